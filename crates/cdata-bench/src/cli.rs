//! Command line of the `count_words` demo.

use clap::Parser;

use crate::count::Strategy;

/// Default number of top words displayed per run.
pub const DEFAULT_TOP: usize = 10;

/// Count the words of text files with each container strategy.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(name = "count_words")]
pub struct Cli {
    /// Uses dynamic array with sequential search algorithm
    #[arg(short = 'd')]
    pub sequential: bool,

    /// Uses sorted dynamic array algorithm
    #[arg(short = 's')]
    pub sorted: bool,

    /// Uses hash table algorithm
    #[arg(short = 't')]
    pub hash: bool,

    /// Specifies the number of most used words to display
    #[arg(short = 'n', value_name = "COUNT", default_value_t = DEFAULT_TOP)]
    pub top: usize,

    /// Files to process, in order
    #[arg(required = true)]
    pub files: Vec<String>,
}

impl Cli {
    /// Selected strategies in display order; none selected means all.
    pub fn strategies(&self) -> Vec<Strategy> {
        let selected: Vec<Strategy> = Strategy::ALL
            .into_iter()
            .filter(|strategy| match strategy {
                Strategy::Sequential => self.sequential,
                Strategy::Sorted => self.sorted,
                Strategy::Hash => self.hash,
            })
            .collect();
        if selected.is_empty() {
            Strategy::ALL.to_vec()
        } else {
            selected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("count_words").chain(args.iter().copied()))
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_strategy_selects_all() {
        let cli = parse(&["a.txt"]).unwrap();
        assert_eq!(cli.strategies(), Strategy::ALL.to_vec());
        assert_eq!(cli.top, DEFAULT_TOP);
        assert_eq!(cli.files, vec!["a.txt"]);
    }

    #[test]
    fn flags_and_count() {
        let cli = parse(&["-t", "a.txt", "-n", "3", "-d", "b.txt"]).unwrap();
        assert_eq!(cli.strategies(), vec![Strategy::Sequential, Strategy::Hash]);
        assert_eq!(cli.top, 3);
        assert_eq!(cli.files, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn flags_combine_in_one_argument() {
        let cli = parse(&["-st", "a.txt"]).unwrap();
        assert_eq!(cli.strategies(), vec![Strategy::Sorted, Strategy::Hash]);
    }

    #[test]
    fn help_is_reported_as_help() {
        let err = parse(&["-h", "a.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(
            parse(&[]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["-s"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["-x", "a.txt"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert_eq!(
            parse(&["a.txt", "-n", "ten"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert!(parse(&["a.txt", "-n"]).is_err());
    }

    #[test]
    fn help_lists_every_flag() {
        let help = Cli::command().render_help().to_string();
        for strategy in Strategy::ALL {
            assert!(help.contains(&format!("-{}", strategy.flag())));
            assert!(help.contains(strategy.help()));
        }
        assert!(help.contains("-n"));
    }
}
