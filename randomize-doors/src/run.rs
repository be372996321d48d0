use std::path::PathBuf;

use door_placement::{Canvas, Placer, SizingPolicy};
use rand::Rng;

use crate::error::LayoutError;
use crate::layout::LayoutDocument;

#[derive(Clone, Debug)]
pub struct RandomizeArgs {
    pub layout_path: PathBuf,
    pub policy: SizingPolicy,
    pub canvas: Canvas,
    pub max_attempts_per_item: u64,

    /// Compute and render the new layout without touching any file.
    pub dry_run: bool,
}

#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub layout_path: PathBuf,

    /// `None` for a dry run.
    pub backup_path: Option<PathBuf>,
    pub placed: usize,

    /// The new document as written (or as it would have been written).
    pub document: String,
}

/// Re-roll every door in the layout file. Nothing is written unless every door was placed, and the layout
/// itself is only overwritten after its backup exists.
pub fn randomize<R>(args: &RandomizeArgs, rng: &mut R) -> Result<RunOutcome, LayoutError>
where
    R: Rng + ?Sized,
{
    let mut document = LayoutDocument::load(&args.layout_path)?;
    let ids = document.door_ids()?;
    tracing::info!(
        layout = %args.layout_path.display(),
        doors = ids.len(),
        canvas_width = args.canvas.width,
        canvas_height = args.canvas.height,
        "placing doors"
    );

    let placer = Placer::new(args.policy.clone(), args.canvas, args.max_attempts_per_item);
    let placement = placer.place(ids, rng)?;
    document.replace_doors(&placement)?;
    let rendered = document.to_pretty_json()?;

    if args.dry_run {
        tracing::info!("dry run, nothing written");
        return Ok(RunOutcome {
            layout_path: args.layout_path.clone(),
            backup_path: None,
            placed: placement.len(),
            document: rendered,
        });
    }

    let backup_path = document.write_backup()?;
    tracing::info!(backup = %backup_path.display(), "wrote backup");
    document.save()?;
    tracing::info!(layout = %args.layout_path.display(), "wrote layout");

    Ok(RunOutcome {
        layout_path: args.layout_path.clone(),
        backup_path: Some(backup_path),
        placed: placement.len(),
        document: rendered,
    })
}
