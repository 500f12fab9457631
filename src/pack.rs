use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, IncludeFilter, Result};

/// Guard emitted ahead of the public section. It does not follow `--macro`.
pub const SINGLE_FILE_GUARD: &str = "NK_SINGLE_FILE";

/// Which files go into which section of the packed output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub macro_name: String,
    pub intro: Vec<PathBuf>,
    pub public: Vec<PathBuf>,
    pub private: Vec<PathBuf>,
    pub outro: Vec<PathBuf>,
}

/// The contents of every file in a [`Layout`], read up front so nothing is
/// written unless all inputs could be read.
#[derive(Debug, Clone)]
pub struct Amalgamation {
    macro_name: String,
    intro: Vec<String>,
    public: Vec<String>,
    private: Vec<String>,
    outro: Vec<String>,
}

impl Amalgamation {
    pub fn load(layout: &Layout) -> Result<Self> {
        let filter = IncludeFilter::new(layout.public.iter().chain(layout.private.iter()));

        let private = layout
            .private
            .iter()
            .map(|p| read_text(p).map(|s| filter.apply(&s)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            macro_name: layout.macro_name.clone(),
            intro: read_all(&layout.intro)?,
            public: read_all(&layout.public)?,
            private,
            outro: read_all(&layout.outro)?,
        })
    }

    pub fn write_to(&self, w: &mut impl Write) -> Result<()> {
        let m = &self.macro_name;

        writeln!(w, "/*")?;
        for s in self.intro.iter() {
            w.write_all(s.as_bytes())?;
        }
        writeln!(w, "*/")?;

        writeln!(w, "#ifndef {SINGLE_FILE_GUARD}")?;
        writeln!(w, "  #define {SINGLE_FILE_GUARD}")?;
        writeln!(w, "#endif")?;
        writeln!(w)?;

        for s in self.public.iter() {
            w.write_all(s.as_bytes())?;
        }

        writeln!(w, "\n#ifdef {m}_IMPLEMENTATION")?;
        writeln!(w)?;
        for s in self.private.iter() {
            writeln!(w, "{s}")?;
        }
        writeln!(w, "#endif /* {m}_IMPLEMENTATION */")?;

        writeln!(w, "\n/*")?;
        for s in self.outro.iter() {
            w.write_all(s.as_bytes())?;
        }
        writeln!(w, "*/\n")?;

        w.flush()?;
        Ok(())
    }
}

fn read_all(paths: &[PathBuf]) -> Result<Vec<String>> {
    paths.iter().map(|p| read_text(p)).collect()
}

/// Read a whole file, normalizing `\r\n` and lone `\r` line endings to `\n`.
fn read_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), len = text.len(), "read");

    if text.contains('\r') {
        Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Ok(text)
    }
}
