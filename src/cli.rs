use clap::{Parser, Subcommand};
use sheet_check_common::Task;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-check")]
#[command(about = "表格数据规则检测工具（按列规则 + 大模型判定）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 列出可处理的列
    Columns {
        /// 表格文件（xlsx / xls / xlsb / ods）
        #[arg(required = true)]
        input: PathBuf,

        /// 任务 (anomaly / conformity)
        #[arg(short, long, default_value = "conformity")]
        task: Task,
    },

    /// 预览前几行数据
    Preview {
        /// 表格文件
        #[arg(required = true)]
        input: PathBuf,

        /// 预览行数
        #[arg(short, long, default_value = "10")]
        rows: usize,
    },

    /// 按列规则检测并导出结果
    Check {
        /// 表格文件
        #[arg(required = true)]
        input: PathBuf,

        /// 任务 (anomaly / conformity)
        #[arg(short, long, default_value = "conformity")]
        task: Task,

        /// 列规则，形如 "列名=规则"（可重复）
        #[arg(short, long = "rule")]
        rules: Vec<String>,

        /// 规则 JSON 文件
        #[arg(long)]
        rules_file: Option<PathBuf>,

        /// 输出文件/目录（默认: 当前目录/检测结果.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 交互式选择列并填写规则
    Interactive {
        /// 表格文件
        #[arg(required = true)]
        input: PathBuf,

        /// 输出文件/目录
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 启动浏览器界面
    Serve {
        /// 监听地址
        #[arg(short, long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
    },

    /// 查看/修改模型配置
    Config {
        /// 设置接口地址
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 设置部署名
        #[arg(long)]
        set_deployment: Option<String>,

        /// 设置 API 版本
        #[arg(long)]
        set_api_version: Option<String>,

        /// 设置 API Key
        #[arg(long)]
        set_api_key: Option<String>,

        /// 显示配置
        #[arg(long)]
        show: bool,
    },
}
