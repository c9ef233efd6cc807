//! Import, export and worker dialogs as copy-paste text.

use hntr_core::instructions::{
    export_command, import_command, tagged_import_command, worker_docker_steps,
    worker_install_steps,
};
use hntr_core::types::BoxId;

pub fn import(api_url: &str, box_id: &BoxId, container: &str) -> String {
    let example_tags = ["is_scope".to_string(), "is_wildcard".to_string()];
    format!(
        "Import {container}\n\n\
         You can use the following command to pipe {container} directly into your box:\n\n  {}\n\n\
         Optionally tag every imported record:\n\n  {}\n",
        import_command(api_url, box_id, container),
        tagged_import_command(api_url, box_id, container, &example_tags),
    )
}

pub fn export(api_url: &str, box_id: &BoxId, container: &str) -> String {
    format!(
        "Export {container}\n\n  {}\n",
        export_command(api_url, box_id, container)
    )
}

pub fn worker(box_id: &BoxId) -> String {
    let indent = |steps: Vec<String>| {
        steps
            .into_iter()
            .map(|s| format!("  {s}\n"))
            .collect::<String>()
    };
    format!(
        "Install a worker\n\n\
         Automations are executed by workers you run yourself. Start one with:\n\n{}\n\
         Or with Docker:\n\n{}",
        indent(worker_install_steps(box_id)),
        indent(worker_docker_steps(box_id)),
    )
}
