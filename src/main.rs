use clap::Parser;
use sheet_check_common::RuleSet;
use sheet_rule_check::{cli, config, error, export, flow, interactive, llm, logging, preview, progress, server};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use llm::AzureChatClient;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Columns { input, task } => {
            let table = flow::load_table(&input)?;
            let candidates = flow::candidate_columns(&table, task);

            println!("任务: {}", task);
            println!("全部列 ({}):", table.columns().len());
            for column in table.columns() {
                let mark = if candidates.contains(column) { "✔" } else { " " };
                println!("  {} {}", mark, column);
            }
            if !task.is_implemented() {
                println!("\n⚠ 尚未实现该功能。");
            }
        }

        Commands::Preview { input, rows } => {
            let table = flow::load_table(&input)?;
            println!("数据预览（前 {} 行，共 {} 行）", rows, table.len());
            println!("{}", preview::render_preview(&table, rows));
        }

        Commands::Check { input, task, rules, rules_file, output } => {
            println!("📋 sheet-check - 规则检测\n");

            // 1. 读取表格
            println!("[1/3] 读取表格...");
            let table = flow::load_table(&input)?;
            println!("✔ {} 行, {} 列\n", table.len(), table.columns().len());

            // 2. 规则（文件 + 命令行，命令行覆盖同名列）
            let mut rule_set = match rules_file {
                Some(path) => RuleSet::from_json(&std::fs::read_to_string(&path)?)?,
                None => RuleSet::new(),
            };
            let cli_rules = RuleSet::from_assignments(&rules)?;
            for (column, rule) in cli_rules.iter() {
                rule_set.set(column, rule);
            }

            // 3. 检测
            println!("[2/3] 正在进行检测 ({})...", task);
            let bar = progress::create_progress_bar("正在进行检测，请稍候...");
            let connect = || config.resolve().map(AzureChatClient::new);
            let outcome = flow::run_check_with(connect, table, task, &rule_set, &bar).await?;
            println!("✔ 检测完成\n");

            println!("检测结果（前 {} 行）", flow::PREVIEW_ROWS);
            println!("{}", preview::render_preview(&outcome.table, flow::PREVIEW_ROWS));
            println!("{}\n", preview::render_summary(&outcome.results));

            // 4. 导出
            println!("[3/3] 导出结果...");
            let target = output.unwrap_or_else(|| PathBuf::from("."));
            let saved = export::save_workbook(&outcome.workbook, &target)?;
            println!("✔ 结果已保存: {}", saved.display());

            println!("\n✅ 完成");
        }

        Commands::Interactive { input, output } => {
            println!("📋 sheet-check - 交互检测\n");
            let model = AzureChatClient::new(config.resolve()?);
            interactive::run_interactive(&model, &input, output.as_deref()).await?;
        }

        Commands::Serve { addr } => {
            let model = Arc::new(AzureChatClient::new(config.resolve()?));
            server::serve(addr, model).await?;
        }

        Commands::Config { set_endpoint, set_deployment, set_api_version, set_api_key, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(endpoint) = set_endpoint {
                config.endpoint = Some(endpoint);
                changed = true;
            }
            if let Some(deployment) = set_deployment {
                config.deployment = Some(deployment);
                changed = true;
            }
            if let Some(version) = set_api_version {
                config.api_version = version;
                changed = true;
            }
            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 配置已保存: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let unset = || "未设置".to_string();
                println!("配置:");
                println!("  接口地址: {}", config.endpoint.clone().unwrap_or_else(unset));
                println!("  部署名: {}", config.deployment.clone().unwrap_or_else(unset));
                println!("  API 版本: {}", config.api_version);
                println!("  API Key: {}", if config.api_key.is_some() { "已设置" } else { "未设置" });
                println!("  （环境变量 {} 等优先于配置文件）", config::ENV_ENDPOINT);
            }
        }
    }

    Ok(())
}
