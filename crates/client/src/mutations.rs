//! Create, update and delete calls.
//!
//! Every mutation is a direct call through [`HntrApi`] with no optimistic
//! local update. [`commit`] runs one and, on success, revalidates the
//! resources it affected; on failure it turns the error into an [`Alert`].

use std::future::Future;

use hntr_core::models::{
    AutomationTemplate, CreatedWorkspace, DeleteRecords, ImportSummary, NewAutomation,
    TagRecords, UpdateWorkspace,
};
use hntr_core::tags::join_tags;
use hntr_core::types::{AutomationId, BoxId, RecordKey};
use reqwest::Method;

use crate::alert::Alert;
use crate::api::HntrApi;
use crate::endpoints;
use crate::error::ApiError;
use crate::resource::Revalidate;

/// Await `request`; on success revalidate every resource in `affected`.
///
/// Failures are logged and surfaced as an [`Alert`] prefixed with
/// `context`. Nothing is revalidated after a failure.
pub async fn commit<T, F>(
    context: &str,
    affected: &[&dyn Revalidate],
    request: F,
) -> Result<T, Alert>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match request.await {
        Ok(value) => {
            for resource in affected {
                resource.revalidate().await;
            }
            Ok(value)
        }
        Err(e) => {
            tracing::warn!(context, error = %e, "Mutation failed");
            Err(Alert::from_error(context, &e))
        }
    }
}

impl HntrApi {
    // ---- boxes ----

    /// Create a box with the server's default name and containers.
    pub async fn create_box(&self) -> Result<CreatedWorkspace, ApiError> {
        let created: CreatedWorkspace = self.post(&endpoints::create_box()).await?;
        tracing::info!(box_id = %created.id, "Box created");
        Ok(created)
    }

    /// Replace the box name and container list.
    pub async fn update_box(&self, box_id: &BoxId, update: &UpdateWorkspace) -> Result<(), ApiError> {
        self.send_unit(Method::PUT, &endpoints::box_detail(box_id), Some(update))
            .await
    }

    pub async fn delete_box(&self, box_id: &BoxId) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::DELETE, &endpoints::box_detail(box_id), None)
            .await?;
        tracing::info!(%box_id, "Box deleted");
        Ok(())
    }

    // ---- records ----

    /// Add `tags` to the selected records of one container.
    pub async fn tag_records(
        &self,
        box_id: &BoxId,
        container: &str,
        records: Vec<RecordKey>,
        tags: Vec<String>,
    ) -> Result<(), ApiError> {
        let body = TagRecords { records, tags };
        self.send_unit(Method::PUT, &endpoints::container(box_id, container), Some(&body))
            .await
    }

    pub async fn delete_records(
        &self,
        box_id: &BoxId,
        container: &str,
        records: Vec<RecordKey>,
    ) -> Result<(), ApiError> {
        let body = DeleteRecords { records };
        self.send_unit(
            Method::PUT,
            &endpoints::delete_records(box_id, container),
            Some(&body),
        )
        .await
    }

    /// Pipe newline-separated `data` into a container, tagging every line.
    /// With `update`, existing records get the tags too.
    pub async fn import_records(
        &self,
        box_id: &BoxId,
        container: &str,
        data: &str,
        tags: &[String],
        update: bool,
    ) -> Result<ImportSummary, ApiError> {
        let mut endpoint = endpoints::container(box_id, container);
        if !tags.is_empty() {
            endpoint = endpoint.query("tags", join_tags(tags));
        }
        if update {
            endpoint = endpoint.query("update", 1);
        }
        let summary: ImportSummary = self.post_raw(&endpoint, data).await?;
        tracing::info!(%box_id, container, changed = summary.changed, "Records imported");
        Ok(summary)
    }

    // ---- automations ----

    pub async fn create_automation(
        &self,
        box_id: &BoxId,
        automation: &NewAutomation,
    ) -> Result<(), ApiError> {
        self.send_unit(
            Method::POST,
            &endpoints::box_automations(box_id),
            Some(automation),
        )
        .await
    }

    /// Create an automation from a library entry, sent as served.
    pub async fn import_from_library(
        &self,
        box_id: &BoxId,
        template: &AutomationTemplate,
    ) -> Result<(), ApiError> {
        self.send_unit(
            Method::POST,
            &endpoints::box_automations(box_id),
            Some(template),
        )
        .await
    }

    pub async fn update_automation(
        &self,
        id: &AutomationId,
        automation: &NewAutomation,
    ) -> Result<(), ApiError> {
        self.send_unit(Method::PUT, &endpoints::automation(id), Some(automation))
            .await
    }

    pub async fn delete_automation(&self, id: &AutomationId) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::DELETE, &endpoints::automation(id), None)
            .await
    }

    /// Enqueue a run. Fire-and-forget: the answer body is ignored.
    pub async fn start_automation(&self, id: &AutomationId) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::POST, &endpoints::start_automation(id), None)
            .await?;
        tracing::info!(automation_id = %id, "Automation started");
        Ok(())
    }

    /// Drop the run history of every automation in the box, optionally only
    /// events with the given status.
    pub async fn clear_events(&self, box_id: &BoxId, status: Option<&str>) -> Result<(), ApiError> {
        let mut endpoint = endpoints::clear_events(box_id);
        if let Some(status) = status {
            endpoint = endpoint.query("status", status);
        }
        self.send_unit::<()>(Method::POST, &endpoint, None).await
    }
}
