use crate::options::CardOptions;
use crate::render::render_records;
use crate::rows::{load_rows, records_from_rows};
use crate::types::{PriceCardError, RenderReport, Result};
use std::path::{Path, PathBuf};

/// Read rows from `input_path`, render them over the background at
/// `background_path` and write the PDF to `output_path`.
///
/// Fatal errors leave no file at `output_path`.
pub async fn generate_price_pdf(
    input_path: impl AsRef<Path>,
    background_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &CardOptions,
) -> Result<RenderReport> {
    options.validate()?;

    let rows = load_rows(&input_path).await?;
    let records = records_from_rows(&rows, options)?;
    let background = read_background(background_path.as_ref(), options.strict).await?;

    let options = options.clone();
    let output = tokio::task::spawn_blocking(move || {
        render_records(&records, &options, background.as_deref())
    })
    .await??;

    write_pdf(&output.bytes, output_path).await?;

    Ok(output.report)
}

async fn read_background(path: &Path, strict: bool) -> Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if strict => Err(PriceCardError::AssetLoadFailure(format!(
            "{}: {}",
            path.display(),
            e
        ))),
        Err(e) => {
            log::warn!("Cannot read background {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

/// Write `bytes` next to `path` first, then move it into place.
pub async fn write_pdf(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let partial = partial_path(path);

    if let Err(e) = tokio::fs::write(&partial, bytes).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&partial, path).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }

    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    path.with_file_name(format!(".{}.partial", name))
}
