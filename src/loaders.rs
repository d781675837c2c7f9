//! Hugging Face Hub loaders for the files a sequence-classification model needs.
//!
//! - [`HfLoader`] - fetches a single file from a repository revision, with retry
//!   on hub cache lock contention
//! - [`TokenizerLoader`] - fetches and parses `tokenizer.json`
//! - [`ModelFilesLoader`] - fetches `config.json` plus the weights, preferring
//!   `model.safetensors` over `pytorch_model.bin`

use crate::core::{Result, SentimentError};
use hf_hub::api::tokio::ApiBuilder;
use hf_hub::{Repo, RepoType};
use std::path::PathBuf;
use tokenizers::Tokenizer;

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub revision: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, revision: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
            filename: filename.into(),
        }
    }

    pub async fn load(&self) -> Result<PathBuf> {
        let hf_api = ApiBuilder::new().with_chunk_size(None).build()?;
        let hf_repo = hf_api.repo(Repo::with_revision(
            self.repo.clone(),
            RepoType::Model,
            self.revision.clone(),
        ));

        let max_retries = 3;
        let mut attempt = 0;

        loop {
            match hf_repo.get(self.filename.as_str()).await {
                Ok(path) => {
                    tracing::debug!(repo = %self.repo, file = %self.filename, "resolved hub file");
                    return Ok(path);
                }
                Err(e) => {
                    attempt += 1;
                    if e.to_string().contains("Lock acquisition failed") && attempt < max_retries {
                        // Another process holds the cache lock; back off exponentially.
                        let wait_time = std::time::Duration::from_millis(100 * (1 << attempt));
                        tracing::warn!(
                            repo = %self.repo,
                            file = %self.filename,
                            attempt,
                            "hub cache locked, retrying in {wait_time:?}"
                        );
                        tokio::time::sleep(wait_time).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
}

impl TokenizerLoader {
    pub fn new(repo: &str, revision: &str) -> Self {
        Self {
            tokenizer_file_loader: HfLoader::new(repo, revision, "tokenizer.json"),
        }
    }

    pub async fn load(&self) -> Result<Tokenizer> {
        let tokenizer_file_path = self.tokenizer_file_loader.load().await?;

        Tokenizer::from_file(&tokenizer_file_path).map_err(|e| {
            SentimentError::Tokenization(format!(
                "Failed to load tokenizer {tokenizer_file_path:?}: {e}"
            ))
        })
    }
}

/// Local paths of a downloaded classification checkpoint.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub weights: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ModelFilesLoader {
    repo: String,
    revision: String,
}

impl ModelFilesLoader {
    pub fn new(repo: &str, revision: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
        }
    }

    pub async fn load(&self) -> Result<ModelFiles> {
        let config = HfLoader::new(&self.repo, &self.revision, "config.json")
            .load()
            .await?;

        let weights = match HfLoader::new(&self.repo, &self.revision, "model.safetensors")
            .load()
            .await
        {
            Ok(safetensors) => safetensors,
            Err(_) => HfLoader::new(&self.repo, &self.revision, "pytorch_model.bin")
                .load()
                .await
                .map_err(|e| {
                    SentimentError::Download(format!(
                        "Model weights not found in {}. Expected `model.safetensors` or `pytorch_model.bin`. Error: {e}",
                        self.repo
                    ))
                })?,
        };

        Ok(ModelFiles { config, weights })
    }
}
