use std::ffi::OsString;
use std::path::PathBuf;

use clap::*;

const LAYOUT: &str = "\
where <files> can be a comma-separated list of files. e.g. --priv *.c,inc/*.h

The resulting code is packed as follows:

    /*
    [intro file contents]
    */

    #ifndef NK_SINGLE_FILE
      #define NK_SINGLE_FILE
    #endif

    [public header file contents]

    #ifdef <macro>_IMPLEMENTATION
    [private header and source file contents]
    #endif /* <macro>_IMPLEMENTATION */

    /*
    [outro file contents]
    */";

/// Pack public headers and private sources into a single-header library.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "single-header-packer",
    after_help = LAYOUT,
    args_override_self = true,
    disable_help_flag = true
)]
pub struct Args {
    /// Prefix of the `<macro>_IMPLEMENTATION` guard
    #[arg(long = "macro", value_name = "macro", allow_hyphen_values = true)]
    pub macro_name: Option<String>,

    /// Files placed in the leading comment block
    #[arg(long, value_name = "files", allow_hyphen_values = true)]
    pub intro: Option<String>,

    /// Public header files, emitted verbatim
    #[arg(long = "pub", value_name = "files", allow_hyphen_values = true)]
    pub public: Option<String>,

    /// Private headers and sources, emitted inside the implementation guard
    #[arg(long = "priv", value_name = "files", allow_hyphen_values = true)]
    pub private: Option<String>,

    /// Files placed in the trailing comment block
    #[arg(long, value_name = "files", allow_hyphen_values = true)]
    pub outro: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

const WITH_VALUE: &[&str] = &["--macro", "--intro", "--pub", "--priv", "--outro", "--output", "-o"];
const FLAGS: &[&str] = &["--help"];

/// Split raw arguments (without the program name) into the ones clap should
/// see and the unrecognized ones, which are reported but otherwise ignored.
pub fn sift(tokens: impl IntoIterator<Item = OsString>) -> (Vec<OsString>, Vec<OsString>) {
    let mut known = Vec::new();
    let mut unknown = Vec::new();

    let mut tokens = tokens.into_iter();
    while let Some(t) = tokens.next() {
        let s = t.to_string_lossy().into_owned();
        if WITH_VALUE.contains(&s.as_str()) {
            known.push(t);
            known.extend(tokens.next());
        } else if FLAGS.contains(&s.as_str()) || is_inline_value(&s) {
            known.push(t);
        } else {
            unknown.push(t);
        }
    }

    (known, unknown)
}

// `--pub=a.h` style
fn is_inline_value(token: &str) -> bool {
    token
        .split_once('=')
        .is_some_and(|(flag, _)| flag.starts_with("--") && WITH_VALUE.contains(&flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(v: &[&str]) -> Vec<OsString> {
        v.iter().map(OsString::from).collect()
    }

    fn parse(v: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("single-header-packer").chain(v.iter().copied())).unwrap()
    }

    #[test]
    fn test_sift() {
        let (known, unknown) = sift(os(&["--macro", "NK", "--bogus", "--pub", "--weird", "stray"]));
        assert_eq!(known, os(&["--macro", "NK", "--pub", "--weird"]));
        assert_eq!(unknown, os(&["--bogus", "stray"]));
    }

    #[test]
    fn test_short_help_unknown() {
        let (known, unknown) = sift(os(&["-h", "--help"]));
        assert_eq!(known, os(&["--help"]));
        assert_eq!(unknown, os(&["-h"]));
    }

    #[test]
    fn test_long_help() {
        let err = Args::try_parse_from(["single-header-packer", "--help"]).unwrap_err();
        assert_eq!(err.kind(), error::ErrorKind::DisplayHelp);
        assert!(Args::try_parse_from(["single-header-packer", "-h"]).is_err());
    }

    #[test]
    fn test_sift_inline_values() {
        let (known, unknown) = sift(os(&["--macro=NK", "--pub=a.h", "--nope=1", "-o=x"]));
        assert_eq!(known, os(&["--macro=NK", "--pub=a.h"]));
        assert_eq!(unknown, os(&["--nope=1", "-o=x"]));
    }

    #[test]
    fn test_sift_trailing_option() {
        let (known, unknown) = sift(os(&["--priv"]));
        assert_eq!(known, os(&["--priv"]));
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_parse() {
        let args = parse(&["--macro", "NK", "--pub", "nuklear.h", "--priv", "src/*.c,inc/*.h", "-o", "out.h"]);
        assert_eq!(args.macro_name.as_deref(), Some("NK"));
        assert_eq!(args.public.as_deref(), Some("nuklear.h"));
        assert_eq!(args.private.as_deref(), Some("src/*.c,inc/*.h"));
        assert_eq!(args.intro, None);
        assert_eq!(args.output, Some(PathBuf::from("out.h")));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let args = parse(&["--pub", "a.h", "--pub", "b.h"]);
        assert_eq!(args.public.as_deref(), Some("b.h"));
    }

    #[test]
    fn test_hyphen_value() {
        let args = parse(&["--macro", "--pub"]);
        assert_eq!(args.macro_name.as_deref(), Some("--pub"));
        assert_eq!(args.public, None);
    }

    #[test]
    fn test_missing_value() {
        assert!(Args::try_parse_from(["single-header-packer", "--macro"]).is_err());
    }
}
