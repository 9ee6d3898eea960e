/*!

This is the long-form manual for `assemblee_stats` and the `assemblee` program.

## Input tables

The statistics are computed from six tables, exported as CSV files with a
header row. The columns are found by name, their order does not matter.

### Deputies (`df_dep.csv`)

`code`, `first name`, `family name`, `sex` (`female` or `male`),
`date of birth` (`YYYY-MM-DD`), `dep` (department name), `num_dep`
(department number), `circo` (optional), `pol party` (abbreviation of the
party), `activity` (previous job).

The age is computed from the year of birth each time the table is loaded.

### Vote events (`df_vote_descr.csv`)

`scrutin` (or `code`), `date` (`YYYY-MM-DD`), `pour` (votes in favor),
`nb votants` (number of voters), `requis` (votes required), and any number of
`demandeur ...` columns describing who requested the vote.

A vote is accepted when the votes in favor reach the required number.

### Vote records (`df_vote_total.csv`)

One row per deputy and per vote event: `scrutin`, `deputy code`, `pour`,
`contre`, `abstentions`, `non votants`, `par delegation` (booleans or
numbers), `cause` (optional).

### Political parties (`df_polpar.csv`)

`abreviated_name`, `name`, `members`, `color`. The official number of members
is the denominator of all the per-party rates.

### Organs (`df_organs.csv`) and memberships (`df_deputies_in_organs.csv`)

`code`, `name`, `type` for the organs; `code_deputy`, `code_organe` for the
memberships. The organ types `GA`, `PARPOL`, `ASSEMBLEE` and `GP` are not
reported by default. Every deputy is expected to sit in exactly one standing
committee (`COMPER`).

## Participation

* deputy: number of votes of the deputy / number of vote events. The outcomes
  (for, against, abstention, absent, by delegation) are relative to the votes
  of the deputy.
* party: every outcome is divided by (members x number of vote events).
* assembly: number of votes / (number of vote events x number of deputies).

## Configuration

The `assemblee` program accepts a JSON configuration file:

```json
{
  "dataDirectory": "data",
  "files": { "deputies": "df_dep.csv" },
  "excludedOrganTypes": ["GA", "PARPOL", "ASSEMBLEE", "GP"],
  "ageHistogramBins": 12,
  "portraitDirectory": "images"
}
```

All the keys are optional.

*/
