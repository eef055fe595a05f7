use super::store::{StoreError, TemplateStore};
use crate::template::{WorkflowSpec, WorkflowTemplate};

/// Options for one seeding run, mirroring the command-line tool's flags.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Only specs tagged with this business type are processed.
    pub business_type: String,
    /// Restrict the run to a single template (by semantic id).
    pub only: Option<String>,
    /// Delete the scope before seeding.
    pub reset: bool,
    /// Convert and validate but persist nothing.
    pub dry_run: bool,
    pub verbose: bool,
}

impl SeedOptions {
    pub fn for_scope(business_type: impl Into<String>) -> Self {
        SeedOptions {
            business_type: business_type.into(),
            only: None,
            reset: false,
            dry_run: false,
            verbose: false,
        }
    }
}

/// Outcome of a seeding run. Individual template failures land in `errors`
/// (naming the failed path) while the rest of the batch proceeds.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub created: usize,
    pub errors: Vec<String>,
}

/// Materialize and persist every spec in the scope.
///
/// Per-template isolation: a conversion or insert failure for one template
/// is recorded and processing continues with the next. Only infrastructure
/// failures of the reset step abort the run.
pub async fn seed(
    store: &dyn TemplateStore,
    specs: &[WorkflowSpec],
    options: &SeedOptions,
) -> Result<SeedReport, StoreError> {
    if options.reset && !options.dry_run {
        let removed = store.delete_scope(&options.business_type).await?;
        if options.verbose {
            tracing::info!(
                business_type = %options.business_type,
                removed,
                "reset scope before seeding"
            );
        }
    }

    let mut report = SeedReport::default();
    let selected = specs.iter().filter(|s| {
        s.business_type == options.business_type
            && options.only.as_deref().map_or(true, |only| only == s.id)
    });

    for spec in selected {
        let template = match WorkflowTemplate::from_spec(spec) {
            Ok(template) => template,
            Err(err) => {
                report.errors.push(err.to_string());
                continue;
            }
        };

        if options.dry_run {
            report.created += 1;
            if options.verbose {
                tracing::info!(template = %template.semantic_id, "dry run: would create");
            }
            continue;
        }

        match store.insert(&template).await {
            Ok(()) => {
                report.created += 1;
                if options.verbose {
                    tracing::info!(
                        template = %template.semantic_id,
                        version = template.version,
                        "created template"
                    );
                }
            }
            Err(err) => {
                report.errors.push(format!("{}: {}", spec.id, err));
            }
        }
    }

    Ok(report)
}
