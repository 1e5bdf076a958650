/*!

This is the long-form manual for `topsis` and the `topsis` command line program.

## Input format

The input is a CSV file with a header row. The first column identifies the alternatives
(any text). Every following column is a criterion and must only contain numbers.
At least two criteria are required.

```text
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
M4,275,32,8,4
M5,225,16,16,2
```

## Weights and impacts

Weights are given as a comma-separated list of positive numbers, one per criterion. They
do not need to sum to 1.

Impacts are given as a comma-separated list of `+` (higher is better) and `-` (lower is
better), one per criterion.

## Running

```bash
topsis data.csv "1,1,1,2" "-,+,+,+" result.csv
```

The output file contains the input table with two more columns: `Topsis Score` and
`Rank`. Rank 1 is the best alternative. Alternatives with the same score share the same
rank, and the next rank skips accordingly (`1, 1, 3`).

Options:
* `--summary <file or stdout>` writes the details of the evaluation in JSON format
  (ideal points, separation measures, scores and ranks).
* `--reference <file>` compares the output with a reference file and fails if they differ.
* `--strict` fails when the score of an alternative is undefined, instead of setting it to 0.
  This happens when all the alternatives are identical.
* `--email <address>` records a contact address in the summary. The address is checked.
* `--verbose` prints the intermediate steps.

## Errors

Every failure stops the program with a message that starts with `Error: ` and the exit
status 1. The checks run in this order, and none of them writes anything when it fails:
1. the number of arguments
2. the input file exists and can be read as a CSV table
3. at least three columns and one row
4. numeric values in the criterion columns
5. the weights
6. the impacts
7. as many weights and impacts as criteria

During the computation, a criterion column that only contains zeros cannot be normalized
and is reported as an error. So are weights and values so large that the computation
overflows.

The output table is written once the evaluation succeeds. A failure to write the summary,
or a difference with the reference file, is reported after the output table is written.

*/
