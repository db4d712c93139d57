/*!

# Quick start with Google Forms

This example runs a small poll end to end, using an online form to collect
the ballots. It uses Google Forms because it is free and widely available;
Microsoft Forms exports work the same way with the `forms` provider.

We want to rank 3 lunch options: Pizza, Sushi and Ramen. Create a new form
with one **Multiple Choice Grid** question. The rows are the ranking slots
(`First choice`, `Second choice`, `Third choice`), the columns are the
options. Enable "Limit to one response per column" and "Require a response
in each row" so every ballot is a complete ranking.

Share the form with the voters. Once voting is over, open `Responses`,
create the results spreadsheet and download it in the **Excel format**
(xlsx).

Describe the room in `lunch.json` next to the downloaded file:

```json
{
  "room": { "name": "Team lunch", "code": "lunch-friday" },
  "options": ["Pizza", "Sushi", "Ramen"],
  "ballotSources": [
    { "provider": "forms", "filePath": "Team lunch.xlsx", "firstVoteColumnIndex": 3 }
  ]
}
```

The `firstVoteColumnIndex` points at the first ranking column of the export
(the first two columns of a Google Forms export hold the timestamp and the
respondent). Then tabulate:

```bash
rankroom tally --config lunch.json
```

The summary is printed as JSON, best option first:

```text
{
  "ballots": 5,
  "ballotsExact": true,
  "config": {
    "code": "lunch-friday",
    "date": null,
    "name": "Team lunch"
  },
  "results": [
    { "option": "Sushi", "points": 26, "rank": 1, "tied": false },
    { "option": "Pizza", "points": 20, "rank": 2, "tied": false },
    { "option": "Ramen", "points": 14, "rank": 3, "tied": false }
  ],
  "totalPoints": 60
}
```

(`ballotsExact` is `false` when the room was tabulated from pre-aggregated
score rows and the ballot count had to be recovered from the point totals.)

Use `--out results.json` to write the summary to a file instead, and
`--reference expected.json` to fail with a diff when the tabulation does
not match a reference summary.

To show voters the options in a room-stable random order:

```bash
rankroom shuffle --config lunch.json
```

The ordering is seeded with the room code, so it is the same for everyone.
Pass `--seed` to pick another ordering, or drop the code from the
configuration for a fresh order on every run.

*/
