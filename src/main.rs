// ==========================================
// 网络成本估算系统 - 命令行入口
// ==========================================
// 用法:
//   network-cost-estimator [db_path] [params.json]
//
// - db_path 缺省或为 "-" 时使用默认数据库路径
// - params.json 缺省或为 "-" 时从 stdin 读取
// - 估算结果以 JSON 打印到 stdout, 日志写到 stderr
// ==========================================

use anyhow::Context;
use network_cost_estimator::{logging, AppState, ProjectParameters};
use std::io::Read;

fn main() -> anyhow::Result<()> {
    logging::init_from_env();

    let mut args = std::env::args().skip(1);
    let db_path = args
        .next()
        .filter(|s| !s.trim().is_empty() && s != "-")
        .unwrap_or_else(network_cost_estimator::db::default_db_path);
    let params_path = args.next().filter(|s| s != "-");

    tracing::info!(
        "{} v{} (db schema {})",
        network_cost_estimator::APP_NAME,
        network_cost_estimator::VERSION,
        network_cost_estimator::DB_VERSION
    );

    let state = AppState::new(db_path.clone())
        .with_context(|| format!("无法初始化数据库: {}", db_path))?;
    if !state.seed_report.is_empty() {
        tracing::info!(seed = ?state.seed_report, "已写入默认目录");
    }

    let raw = match &params_path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("无法读取参数文件: {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("无法从 stdin 读取参数")?;
            buf
        }
    };

    let params: ProjectParameters =
        serde_json::from_str(&raw).context("参数 JSON 格式错误")?;

    let result = state.estimate_api.run_estimate(&params)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
