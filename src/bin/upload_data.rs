// ==========================================
// 数据平台 - CSV 上传驱动入口
// ==========================================
// 用法: upload_data [data_dir] [api_base]
// 默认: data_dir = synthetic_data
//       api_base = $DATA_PLATFORM_API_BASE，未设置时为 http://127.0.0.1:5000
// 行为: 每行 CSV 原样 POST 到对应上传端点，缺失文件跳过
// ==========================================

use anyhow::Context;
use data_platform::importer::uploader::{upload_directory, HttpRecordUploader, DEFAULT_API_BASE};
use data_platform::logging;
use std::path::PathBuf;

const API_BASE_ENV: &str = "DATA_PLATFORM_API_BASE";
const DEFAULT_DATA_DIR: &str = "synthetic_data";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let api_base = args
        .next()
        .or_else(|| std::env::var(API_BASE_ENV).ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    println!("Uploading from {} to {}", data_dir.display(), api_base);

    let uploader = HttpRecordUploader::new(api_base);
    let summary = upload_directory(&uploader, &data_dir)
        .await
        .context("upload aborted")?;

    for missing in &summary.missing {
        println!("Missing: {}", missing.display());
    }
    for file in &summary.uploaded {
        println!(
            "{} -> {}: sent={} rejected={}",
            file.file_name, file.endpoint, file.rows_sent, file.rows_rejected
        );
    }

    println!("Done.");
    Ok(())
}
