//! Projects command: list tracked projects.

use std::io::Write;

use anyhow::{Context, Result};
use gtr_core::Reporter;

use crate::commands::util::write_json;

pub fn run<W: Write>(writer: &mut W, reporter: &Reporter<'_>, pretty: bool) -> Result<()> {
    let projects = reporter
        .project_list()
        .context("failed to list projects")?;
    write_json(writer, &projects, pretty)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::commands::util::{ReportOptions, Sources};
    use crate::Config;

    #[test]
    fn prints_index_paths_as_json_array() {
        let temp = tempfile::tempdir().unwrap();
        let index_path = temp.path().join("project.json");
        fs::write(
            &index_path,
            r#"{"/work/b":"2024-03-14T10:00:00Z","/work/a":"2024-03-13T10:00:00Z"}"#,
        )
        .unwrap();
        let config = Config {
            project_index: index_path,
            ..Config::default()
        };
        let sources = Sources::from_config(&config);
        let reporter = sources.reporter(&ReportOptions::default());

        let mut output = Vec::new();
        run(&mut output, &reporter, false).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "[\"/work/a\",\"/work/b\"]\n");
    }

    #[test]
    fn broken_index_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let index_path = temp.path().join("project.json");
        fs::write(&index_path, "[1, 2").unwrap();
        let config = Config {
            project_index: index_path,
            ..Config::default()
        };
        let sources = Sources::from_config(&config);
        let reporter = sources.reporter(&ReportOptions::default());

        let err = run(&mut Vec::new(), &reporter, false).unwrap_err();
        assert!(format!("{err:#}").contains("project registry unavailable"));
    }
}
