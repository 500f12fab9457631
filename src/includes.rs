use std::path::Path;

/// Removes `#include "name.h"` and `#include <name.h>` directives for headers
/// that are being packed into the same output.
///
/// Matching is textual: a directive with extra spaces or a trailing comment
/// survives, and a header with the same file name in an unrelated directory
/// is stripped as well.
#[derive(Debug, Clone, Default)]
pub struct IncludeFilter {
    directives: Vec<String>,
}

impl IncludeFilter {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut directives = Vec::new();
        for file in files {
            let file = file.as_ref();
            if !file.to_string_lossy().contains(".h") {
                continue;
            }
            let Some(name) = file.file_name() else { continue };
            let name = name.to_string_lossy();
            directives.push(format!("#include \"{name}\""));
            directives.push(format!("#include <{name}>"));
        }
        Self { directives }
    }

    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_owned();
        for d in self.directives.iter() {
            text = text.replace(d.as_str(), "");
        }
        text
    }
}

pub fn omit_includes<I, P>(text: &str, files: I) -> String
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    IncludeFilter::new(files).apply(text)
}
