//! Input discovery and output file resolution

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
pub const PDF_EXTENSIONS: [&str; 1] = ["pdf"];

/// Files in `dir` with one of `extensions` (any case), sorted by path
pub fn discover(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .with_context(|| format!("Input path is not valid UTF-8: {}", dir.display()))?;
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };

    let mut found = Vec::new();
    for ext in extensions {
        let pattern = format!("{}/*.{}", glob::Pattern::escape(dir_str), ext);
        for entry in glob::glob_with(&pattern, options)? {
            let path = entry?;
            if path.is_file() {
                found.push(path);
            }
        }
    }
    found.sort();
    found.dedup();
    Ok(found)
}

/// Drop `output` from `inputs` so a previous result is not read back in.
///
/// Paths are compared after resolving symlinks and relative parts; when the
/// output does not exist yet nothing is removed.
pub fn exclude_output(mut inputs: Vec<PathBuf>, output: &Path) -> Vec<PathBuf> {
    if let Ok(target) = output.canonicalize() {
        inputs.retain(|input| {
            input
                .canonicalize()
                .map(|path| path != target)
                .unwrap_or(true)
        });
    }
    inputs
}

/// Output file for `input_dir`: the explicit name if given, else the folder
/// name, with `.pdf` appended when missing.
pub fn output_path(input_dir: &Path, output: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let name = match output {
        Some(output) => output.to_path_buf(),
        None => {
            let dir = cwd.join(input_dir);
            let dir = dir.canonicalize().unwrap_or(dir);
            match dir.file_name() {
                Some(name) => PathBuf::from(name),
                None => bail!("Cannot derive an output name from {}", input_dir.display()),
            }
        }
    };

    let mut path = cwd.join(name);
    if !has_pdf_extension(&path) {
        let mut file_name = path.file_name().unwrap_or_default().to_os_string();
        file_name.push(".pdf");
        path.set_file_name(file_name);
    }
    Ok(path)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Ask before replacing an existing output file
pub fn confirm_overwrite(
    path: &Path,
    mut input: impl BufRead,
    mut prompt: impl Write,
) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    write!(prompt, "{} already exists. Overwrite? [y/N] ", path.display())?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => bail!("Output file is already existing"),
    }
}
