use std::path::PathBuf;

use bucketput::PutObjectOptions;
use clap::Parser;

/// Put a file into an S3-compatible bucket
#[derive(Parser, Debug)]
#[command(name = "bucketput", version)]
pub struct Args {
    /// Target bucket
    pub bucket: String,

    /// Object key
    pub key: String,

    /// File to upload
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Canned ACL (private, public-read, public-read-write, authenticated-read)
    #[arg(long)]
    pub acl: Option<String>,

    /// Content type; inferred from the file name when omitted
    #[arg(long, value_name = "MIME")]
    pub content_type: Option<String>,

    /// Storage class, e.g. STANDARD or STANDARD_IA
    #[arg(long)]
    pub storage_class: Option<String>,

    /// Extra request header, repeatable
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Use the in-memory store instead of the live service
    #[arg(long)]
    pub mock: bool,
}

impl Args {
    /// Collect the flags into put options. Named flags win over `-H`.
    pub fn options(&self) -> PutObjectOptions {
        let mut options: PutObjectOptions = self.headers.iter().cloned().collect();
        if let Some(acl) = &self.acl {
            options.insert("x-amz-acl", acl.as_str());
        }
        if let Some(content_type) = &self.content_type {
            options.insert("content-type", content_type.as_str());
        }
        if let Some(storage_class) = &self.storage_class {
            options.insert("x-amz-storage-class", storage_class.as_str());
        }
        options
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {raw:?}"));
    }
    Ok((name.to_owned(), value.trim().to_owned()))
}
