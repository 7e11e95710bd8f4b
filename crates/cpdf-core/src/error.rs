use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpdfError {
    #[error("{label}: failed to spawn `{command}`: {source}")]
    Spawn {
        label: String,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{label}: `{command}` exited with {}: {stderr}", exit_description(.code))]
    ProcessFailed {
        label: String,
        command: String,
        /// `None` when the process was terminated by a signal
        code: Option<i32>,
        stderr: String,
    },

    #[error("Page count output is not an integer: {output:?}")]
    InvalidPageCount { output: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_failed_message_includes_label_and_code() {
        let err = CpdfError::ProcessFailed {
            label: "Merging".into(),
            command: "a.pdf b.pdf -o out.pdf".into(),
            code: Some(2),
            stderr: "cpdf: could not read a.pdf".into(),
        };
        let message = err.to_string();
        assert!(message.starts_with("Merging:"));
        assert!(message.contains("status 2"));
        assert!(message.contains("could not read a.pdf"));
    }

    #[test]
    fn test_process_failed_without_code_mentions_signal() {
        let err = CpdfError::ProcessFailed {
            label: "Splitting".into(),
            command: "-split in.pdf -o out".into(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
