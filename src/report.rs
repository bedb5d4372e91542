use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::error::ReduceError;
use crate::reduce::{ReduceMode, Reduction};

// ─── Batch outcome reporting ──────────────────────────────────────────────────

/// Outcome of one skin binding within a batch reduction.
#[derive(Debug, Clone, Serialize)]
pub struct BindingOutcome {
    pub binding_index: usize,
    /// Mode that ran, `None` when the binding failed.
    pub mode: Option<ReduceMode>,
    /// Bone-list length after the reduction, `None` when the binding failed.
    pub bone_count: Option<usize>,
    pub error: Option<String>,
}

/// Host-facing summary of a batch reduction, one entry per binding.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub target_bone: String,
    pub merge_target_bone: String,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<BindingOutcome>,
}

impl BatchReport {
    /// Summarizes the per-binding results of a batch reduction.
    pub fn from_results(
        target_bone: &str,
        merge_target_bone: &str,
        results: &[Result<Reduction, ReduceError>],
    ) -> Self {
        let outcomes: Vec<BindingOutcome> = results
            .iter()
            .enumerate()
            .map(|(binding_index, result)| match result {
                Ok(reduction) => BindingOutcome {
                    binding_index,
                    mode: Some(reduction.mode),
                    bone_count: Some(reduction.bones.len()),
                    error: None,
                },
                Err(error) => BindingOutcome {
                    binding_index,
                    mode: None,
                    bone_count: None,
                    error: Some(error.to_string()),
                },
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        Self {
            target_bone: target_bone.to_string(),
            merge_target_bone: merge_target_bone.to_string(),
            succeeded: outcomes.len() - failed,
            failed,
            outcomes,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize batch report")
    }
}

/// Write a human-readable markdown summary of a batch reduction.
pub fn write_batch_summary(summary_path: &Path, report: &BatchReport) -> Result<()> {
    let mut content = String::new();
    content.push_str("# Bone Reduction Summary\n\n");
    content.push_str(&format!("- Removed bone: `{}`\n", report.target_bone));
    content.push_str(&format!(
        "- Weights merged into: `{}`\n",
        report.merge_target_bone
    ));
    content.push_str(&format!(
        "- Renderers: `{}` succeeded / `{}` failed\n\n",
        report.succeeded, report.failed
    ));

    content.push_str("## Per-renderer outcomes\n\n");
    for outcome in &report.outcomes {
        match (&outcome.mode, &outcome.error) {
            (Some(mode), _) => content.push_str(&format!(
                "- [{}] {:?}, {} bones\n",
                outcome.binding_index,
                mode,
                outcome.bone_count.unwrap_or(0)
            )),
            (None, Some(error)) => {
                content.push_str(&format!("- [{}] skipped: {}\n", outcome.binding_index, error));
            }
            (None, None) => {}
        }
    }

    fs::write(summary_path, content).with_context(|| {
        format!(
            "failed to write reduction summary: {}",
            summary_path.display()
        )
    })?;

    Ok(())
}

// ─── Output path derivation ───────────────────────────────────────────────────

/// Derive the path a reduced mesh asset should be saved under: the source
/// asset's directory and stem with `suffix` appended before the extension.
/// The actual save is the host's concern.
pub fn output_path_with_suffix(asset_path: &Path, suffix: &str) -> PathBuf {
    let stem = asset_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let file_name = match asset_path.extension().and_then(|ext| ext.to_str()) {
        Some(extension) => format!("{stem}{suffix}.{extension}"),
        None => format!("{stem}{suffix}"),
    };
    asset_path.with_file_name(file_name)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
