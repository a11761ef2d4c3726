use anyhow::{anyhow, Context, Result};
use clap::{App, Arg, ArgMatches};

use deinterlace_labels::field::Field;

/// Holds the runtime configuration for the program.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_folder: String,
    pub output_folder: String,
    /// Folder with pre-split fields, named like the frames in `input_folder`.
    /// Fields are extracted from the frames when unset.
    pub field_folder: Option<String>,
    pub field: Field,
    /// Only every n-th frame (by sorted file name) is processed.
    pub sample_period: usize,
    pub threads: usize,
    pub weave: bool,
    pub save_fields: bool,
    pub verbose: bool,
}

const VERBOSE: (&str, &str, &str) = (
    "verbose",
    "v",
    "if set, all logging output is printed. \
        Side-effect: frames and rows are processed on a single thread. \
        Note that there is always a log-file in the output folder with the full log",
);
const INPUT: (&str, &str, &str, &str) = (
    "input",
    "i",
    "the path to the input folder with the progressive (ground truth) frames as PNG",
    "input",
);
const OUTPUT: (&str, &str, &str, &str) = (
    "output",
    "o",
    "the path to the output folder where the result images are stored",
    "output",
);
const FIELDS: (&str, &str) = (
    "fields",
    "the path to a folder with pre-split fields named like the input frames. \
        If not set, fields are extracted from the input frames",
);
const FIELD: (&str, &str, &str) = (
    "field",
    "which field is kept; the rows of the other field are reconstructed",
    "odd",
);
const SAMPLE_PERIOD: (&str, &str, &str) = (
    "sample-period",
    "process only every n-th input frame (in file name order)",
    "1",
);
const THREADS: (&str, &str, &str) = (
    "threads",
    "j",
    "number of worker threads (defaults to the number of logical CPUs)",
);
const WEAVE: (&str, &str) = (
    "weave",
    "also write the best reconstruction woven with the known field as a full frame",
);
const SAVE_FIELDS: (&str, &str) = (
    "save-fields",
    "also write the extracted fields to the output folder",
);

impl Config {
    /// Read command line arguments and flags to generate the runtime configuration.
    pub fn new() -> Result<Self> {
        Self::from_matches(&app().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let field = matches
            .value_of(FIELD.0)
            .unwrap_or(FIELD.2)
            .parse::<Field>()
            .context("invalid --field")?;
        let sample_period = matches
            .value_of(SAMPLE_PERIOD.0)
            .unwrap_or(SAMPLE_PERIOD.2)
            .parse::<usize>()
            .context("--sample-period must be a positive integer")?;
        if sample_period == 0 {
            return Err(anyhow!("--sample-period must be at least 1"));
        }
        let threads = match matches.value_of(THREADS.0) {
            Some(value) => value
                .parse::<usize>()
                .context("--threads must be a positive integer")?,
            None => num_cpus::get(),
        };
        if threads == 0 {
            return Err(anyhow!("--threads must be at least 1"));
        }

        Ok(Self {
            input_folder: matches.value_of(INPUT.0).unwrap_or(INPUT.3).to_string(),
            output_folder: matches.value_of(OUTPUT.0).unwrap_or(OUTPUT.3).to_string(),
            field_folder: matches.value_of(FIELDS.0).map(str::to_string),
            field,
            sample_period,
            threads,
            weave: matches.is_present(WEAVE.0),
            save_fields: matches.is_present(SAVE_FIELDS.0),
            verbose: matches.is_present(VERBOSE.0),
        })
    }
}

fn app() -> App<'static, 'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name(VERBOSE.0)
                .short(VERBOSE.1)
                .long(VERBOSE.0)
                .help(VERBOSE.2)
                .takes_value(false),
        )
        .arg(
            Arg::with_name(INPUT.0)
                .short(INPUT.1)
                .long(INPUT.0)
                .help(INPUT.2)
                .default_value(INPUT.3)
                .takes_value(true),
        )
        .arg(
            Arg::with_name(OUTPUT.0)
                .short(OUTPUT.1)
                .long(OUTPUT.0)
                .help(OUTPUT.2)
                .default_value(OUTPUT.3)
                .takes_value(true),
        )
        .arg(
            Arg::with_name(FIELDS.0)
                .long(FIELDS.0)
                .help(FIELDS.1)
                .takes_value(true),
        )
        .arg(
            Arg::with_name(FIELD.0)
                .long(FIELD.0)
                .help(FIELD.1)
                .possible_values(&["odd", "even"])
                .default_value(FIELD.2)
                .takes_value(true),
        )
        .arg(
            Arg::with_name(SAMPLE_PERIOD.0)
                .long(SAMPLE_PERIOD.0)
                .help(SAMPLE_PERIOD.1)
                .default_value(SAMPLE_PERIOD.2)
                .takes_value(true),
        )
        .arg(
            Arg::with_name(THREADS.0)
                .short(THREADS.1)
                .long(THREADS.0)
                .help(THREADS.2)
                .takes_value(true),
        )
        .arg(
            Arg::with_name(WEAVE.0)
                .long(WEAVE.0)
                .help(WEAVE.1)
                .takes_value(false),
        )
        .arg(
            Arg::with_name(SAVE_FIELDS.0)
                .long(SAVE_FIELDS.0)
                .help(SAVE_FIELDS.1)
                .takes_value(false),
        )
}
