use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("{file} is missing required column(s): {columns}")]
    MissingColumns { file: String, columns: String },

    #[error("{file}, column {column}, row {row}: {message}")]
    MalformedCell {
        file: String,
        column: String,
        row: usize,
        message: String,
    },

    #[error("{file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

impl LoaderError {
    pub fn csv(file: &str, source: csv::Error) -> Self {
        LoaderError::Csv {
            file: file.to_string(),
            source,
        }
    }
}
