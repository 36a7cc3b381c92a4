use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stylematch_common::Audience;

#[derive(Parser)]
#[command(name = "stylematch")]
#[command(about = "衣料品写真の属性解析・ショッピング検索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を解析して結果JSONを出力
    Analyze {
        /// 写真ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 対象 (hombre/mujer)
        #[arg(short, long)]
        genero: Audience,

        /// ラベル検出サービスの代わりに使うラベルJSON
        #[arg(short, long)]
        labels: Option<PathBuf>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// ラベルJSONから属性と検索クエリだけを求める（外部呼び出しなし）
    Resolve {
        /// ラベルJSON（DetectLabels形式または配列）
        #[arg(short, long, required = true)]
        labels: PathBuf,

        /// 対象 (hombre/mujer)
        #[arg(short, long)]
        genero: Audience,
    },

    /// HTTPサーバーを起動
    Serve {
        /// 待ち受けアドレス（省略時は設定値）
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// SerpAPIキーを設定
        #[arg(long)]
        set_serpapi_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
