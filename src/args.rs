use clap::Parser;

/// Ranks the alternatives of a CSV table with the TOPSIS method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The CSV table. The first column identifies the alternatives, the other
    /// columns are numeric criteria.
    #[clap(value_parser)]
    pub input: String,

    /// (comma-separated numbers) One positive weight per criterion, for example "1,1,2".
    #[clap(value_parser, allow_hyphen_values = true)]
    pub weights: String,

    /// (comma-separated + or -) One impact per criterion: + if higher is better, - if lower
    /// is better, for example "+,-,+".
    #[clap(value_parser, allow_hyphen_values = true)]
    pub impacts: String,

    /// (file path) Where to write the input table with the score and rank columns.
    #[clap(value_parser)]
    pub output: String,

    /// (file path or 'stdout') If specified, the details of the evaluation will be written in
    /// JSON format to the given location.
    #[clap(long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference file containing the expected output. If provided, the program will
    /// check that the output matches the reference.
    #[clap(long, value_parser)]
    pub reference: Option<String>,

    /// (email address) A contact address, recorded in the summary.
    #[clap(long, value_parser)]
    pub email: Option<String>,

    /// If passed as an argument, fails when the score of an alternative is undefined instead of
    /// setting it to 0.
    #[clap(long, takes_value = false)]
    pub strict: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
