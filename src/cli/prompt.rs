//! Interactive confirmation

use crate::error::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Ask a yes/no question on stdin; anything but y/yes counts as no
pub async fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
