use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{PlotError, PlotResult};

/// Write `script` to `path`, replacing any previous content. The file ends with a newline.
pub fn write_script(path: &Path, script: &str) -> PlotResult<()> {
    let persist_err = |source| PlotError::Persist {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(persist_err)?;
    writeln!(file, "{}", script).map_err(persist_err)?;
    file.flush().map_err(persist_err)
}
