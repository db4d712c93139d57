/*!

This is the long-form manual for `positional_voting` and `rankroom`.

## Scoring

Each room has an ordered list of options and a point-weight scheme of the
same length. A ballot ranks all the options, best first; the option at rank
position `i` (0-indexed) receives `weights[i]` points from that ballot. By
default a room with `N` options uses the scheme `2N, 2N-2, ..., 2`, so a
first place is always worth twice the number of options.

The leaderboard sorts by total points, descending. Options with equal
points are ordered by their name (case-sensitive) so the output is stable,
and every member of an equal-points block is flagged as tied. Ranks follow
the usual competition numbering: points `10, 10, 8, 8, 8, 5` rank
`1, 1, 3, 3, 3, 6`.

## Input formats

The following providers are supported in `ballotSources`:
* `csv` plain Comma Separated Values exports
* `forms` ranking grids exported from Microsoft Forms or Google Forms
* `scores` pre-aggregated point totals

### `csv`

One row per ballot, choices in rank order (best first):

```text
id,count,choice 1,choice 2,choice 3
id1,1,A,B,C
id2,2,B,A,C
```

The `id` and `count` columns are optional; see the configuration section
for the column and row offsets. Empty cells are skipped.

### `forms`

The Excel (.xlsx) export of a ranking question: every cell after the start
column names the option placed at that rank. If the workbook has more than
one worksheet, `excelWorksheetName` selects one.

### `scores`

A JSON array of running totals, for stores that keep aggregated points
instead of full rankings:

```json
[ {"option": "A", "points": 12}, {"option": "B", "points": 7} ]
```

With this provider the ballot count in the summary is recovered from the
point totals (`totalPoints / sum(weights)`, rounded). That recovery assumes
every recorded ballot ranked every option under the current scheme; if the
options or weights changed after ballots were recorded, the figure drifts.

## Configuration

A room is described by a JSON file:

```json
{
  "room": { "name": "Team lunch", "code": "blue-fox", "date": "2024-05-02" },
  "options": ["Pizza", "Sushi", "Tacos", "Ramen"],
  "weights": [8, 6, 4, 2],
  "ballotSources": [
    { "provider": "csv", "filePath": "ballots.csv", "firstVoteRowIndex": 2, "firstVoteColumnIndex": 2, "idColumnIndex": 1 }
  ]
}
```

Fields of `room` other than `name` are optional. `weights` is optional and
defaults to the `2N...2` scheme. Option names are trimmed and must be
unique when compared case-insensitively; the stored spelling is shown
verbatim in the results.

Fields of a `ballotSource`:
 - `provider` (string): one of the formats above.
 - `filePath` (string): resolved relative to the configuration file.
 - `firstVoteRowIndex` (number, optional): the 1-based row where ballots
   start, used to skip header rows. Defaults to the first row.
 - `firstVoteColumnIndex` (number or Excel column letter, optional): the
   1-based column of the first choice. Defaults to the first column.
 - `idColumnIndex`, `countColumnIndex` (number or letter, optional): the
   columns holding a ballot id and a multiplicity. If not provided, ids are
   derived from the file name and every ballot counts once.
 - `excelWorksheetName` (string, optional): for Excel-based inputs, the
   name of the worksheet.

## Seeded ordering

`rankroom shuffle` prints the voter-facing ballot order of the options and
`rankroom draw` picks entries from them. Both accept a `--seed` string:
the same seed over the same options reproduces the ordering everywhere.
When a room configuration is given and no seed is passed, the room code is
used, so every voter of a room sees the same order. Without a seed and
without a room code the order is freshly random on each run.

*/
