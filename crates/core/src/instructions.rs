//! Copy-paste instructions shown in the import, export and worker dialogs.
//!
//! Import and export are not client features: the user pipes data straight
//! into or out of the list endpoint with `curl`.

use crate::pagination::MAX_LIMIT;
use crate::types::BoxId;

/// Where the worker script and Dockerfile are published.
pub const WORKER_DOWNLOAD_URL: &str = "https://hntr.unlink.io";

/// Pipe a file of records into a container.
pub fn import_command(api_url: &str, box_id: &BoxId, container: &str) -> String {
    format!(
        "cat {container}.txt | curl --data-binary @- \"{}/box/{box_id}/{container}\"",
        api_url.trim_end_matches('/')
    )
}

/// Same as [`import_command`], tagging every imported record.
pub fn tagged_import_command(
    api_url: &str,
    box_id: &BoxId,
    container: &str,
    tags: &[String],
) -> String {
    format!(
        "echo example.com | curl --data-binary @- \"{}/box/{box_id}/{container}?tags={}\"",
        api_url.trim_end_matches('/'),
        tags.join(",")
    )
}

/// Dump a container's record data, one per line.
pub fn export_command(api_url: &str, box_id: &BoxId, container: &str) -> String {
    format!(
        "curl -s \"{}/box/{box_id}/{container}?limit={MAX_LIMIT}\" | jq -r '.records[].data'",
        api_url.trim_end_matches('/')
    )
}

/// Shell steps that start a worker polling this box for jobs.
pub fn worker_install_steps(box_id: &BoxId) -> Vec<String> {
    vec![
        format!("wget {WORKER_DOWNLOAD_URL}/worker.sh"),
        "chmod +x worker.sh".to_string(),
        format!("./worker.sh {box_id}"),
    ]
}

/// Docker alternative to [`worker_install_steps`].
pub fn worker_docker_steps(box_id: &BoxId) -> Vec<String> {
    vec![
        format!("wget {WORKER_DOWNLOAD_URL}/Dockerfile"),
        "docker build -t hntr-runner .".to_string(),
        format!("docker run --rm -it hntr-runner {box_id}"),
    ]
}
