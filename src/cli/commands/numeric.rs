//! Numeric codec commands: `parse`, `split`, `format`, `round`, `magnitude`, `options`

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{parse_value_arg, split_list};
use crate::cli::output::print_structured;
use crate::cli::GlobalOpts;
use crate::core::numeric::{self, Suffix, DEFAULT_SELECT_SUFFIXES};

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Values to parse
    #[arg(required = true, allow_hyphen_values = true)]
    pub values: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct SplitArgs {
    /// Stored value, e.g. 4.7k
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct FormatArgs {
    /// Value in engineering notation
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Suffix to format at (G, M, k, m, u, n, p); chosen automatically if omitted
    #[arg(long, short = 's')]
    pub suffix: Option<String>,

    /// Unit label appended to the result
    #[arg(long, short = 'u')]
    pub unit: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RoundArgs {
    /// Value in engineering notation
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Significant digits (default from config)
    #[arg(long, short = 'd')]
    pub digits: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct MagnitudeArgs {
    /// Value in engineering notation
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct OptionsArgs {
    /// Unit label (default from config)
    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    /// Use localized numeral-prefix labels
    #[arg(long, short = 'l')]
    pub localized: bool,

    /// Comma-separated suffixes; an empty entry means no suffix
    #[arg(long)]
    pub suffixes: Option<String>,
}

#[derive(Serialize)]
struct ParsedValue<'a> {
    input: &'a str,
    /// `None` when the input is not a number
    value: Option<f64>,
}

#[derive(Serialize)]
struct SplitValue {
    mantissa: String,
    suffix: Suffix,
    symbol: &'static str,
}

pub fn run_parse(args: ParseArgs, global: &GlobalOpts) -> Result<()> {
    let parsed: Vec<ParsedValue> = args
        .values
        .iter()
        .map(|input| {
            let value = numeric::parse(input);
            ParsedValue {
                input,
                value: (!value.is_nan()).then_some(value),
            }
        })
        .collect();

    if print_structured(&parsed, global.output)? {
        return Ok(());
    }

    for entry in &parsed {
        match entry.value {
            Some(value) => println!("{}\t{}", entry.input, value),
            None => println!("{}\t{}", entry.input, style("NaN").red()),
        }
    }
    Ok(())
}

pub fn run_split(args: SplitArgs, global: &GlobalOpts) -> Result<()> {
    let (mantissa, suffix) = numeric::split(&args.value).into_diagnostic()?;
    let split = SplitValue {
        mantissa,
        symbol: suffix.as_str(),
        suffix,
    };

    if print_structured(&split, global.output)? {
        return Ok(());
    }
    println!("{}\t{}", split.mantissa, split.symbol);
    Ok(())
}

pub fn run_format(args: FormatArgs, global: &GlobalOpts) -> Result<()> {
    let value = parse_value_arg(&args.value)?;
    let mut text = match args.suffix.as_deref() {
        Some(symbol) => {
            let suffix: Suffix = symbol.parse().into_diagnostic()?;
            numeric::format(value, suffix).into_diagnostic()?
        }
        None => numeric::format_engineering(value).into_diagnostic()?,
    };
    if let Some(unit) = &args.unit {
        text.push_str(unit);
    }

    if print_structured(&text, global.output)? {
        return Ok(());
    }
    println!("{}", text);
    Ok(())
}

pub fn run_round(args: RoundArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.load_config()?;
    let value = parse_value_arg(&args.value)?;
    let digits = args.digits.unwrap_or(config.significant_digits);
    let rounded = numeric::round_to_significant_digits(value, digits).into_diagnostic()?;

    if print_structured(&rounded, global.output)? {
        return Ok(());
    }
    println!("{}", rounded);
    Ok(())
}

pub fn run_magnitude(args: MagnitudeArgs, global: &GlobalOpts) -> Result<()> {
    let value = parse_value_arg(&args.value)?;
    let magnitude = numeric::order_of_magnitude(value).into_diagnostic()?;

    if print_structured(&magnitude, global.output)? {
        return Ok(());
    }
    println!("{}", magnitude);
    Ok(())
}

pub fn run_options(args: OptionsArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.load_config()?;
    let unit = args.unit.unwrap_or(config.unit);
    let localized = args.localized || config.localized_labels;
    let suffixes = match &args.suffixes {
        Some(list) => split_list(list),
        None => DEFAULT_SELECT_SUFFIXES.to_vec(),
    };

    let options = numeric::format_select_options(&suffixes, &unit, localized).into_diagnostic()?;

    if print_structured(&options, global.output)? {
        return Ok(());
    }
    for option in &options {
        let value = if option.value.is_empty() {
            style("(none)").dim().to_string()
        } else {
            option.value.clone()
        };
        println!("{}\t{}", option.label, value);
    }
    Ok(())
}
