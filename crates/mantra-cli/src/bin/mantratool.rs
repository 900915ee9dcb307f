use clap::{Parser, Subcommand, ValueEnum};

use mantra_cli::commands::annotate_ops::{self, AnnotateOptions};
use mantra_cli::commands::convert_ops::{self, CsxOptions};
use mantra_cli::commands::{config_ops, table_ops};
use mantra_cli::trace_init::init_tracing;
use mantra_core::phonetic::OutputStyle;

#[derive(Parser)]
#[command(name = "mantratool", about = "Mantra transliteration and annotation tool")]
struct Cli {
    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Bopomofo,
    Pinyin,
}

impl From<Style> for OutputStyle {
    fn from(s: Style) -> Self {
        match s {
            Style::Bopomofo => OutputStyle::Bopomofo,
            Style::Pinyin => OutputStyle::Pinyin,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Convert ASCII phonetic code (CSX) to IAST
    Csx {
        /// Text to convert (ignored with --in)
        text: Vec<String>,
        /// Input file
        #[arg(long = "in")]
        input: Option<String>,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<String>,
        /// Rule set TOML (default: built-in CSX rules)
        #[arg(long)]
        rules: Option<String>,
        /// Multi-char rule table (JSON or TOML), replaces that class
        #[arg(long)]
        multi: Option<String>,
        /// Single-char rule table (JSON or TOML), replaces that class
        #[arg(long)]
        single: Option<String>,
        /// Postfix rule table (JSON or TOML), replaces that class
        #[arg(long)]
        postfix: Option<String>,
        /// Settings TOML (`rules.allow_override` picks the duplicate policy)
        #[arg(long)]
        settings: Option<String>,
        /// Skip the Velthuis -> IAST scheme step
        #[arg(long)]
        no_scheme: bool,
    },
    /// Annotate Chinese chant text with Bopomofo or pinyin readings
    Annotate {
        /// Input chant file
        #[arg(long = "in")]
        input: String,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<String>,
        /// Reading style (default: from settings)
        #[arg(long, value_enum)]
        style: Option<Style>,
        /// Hint keyword list (JSON array or TOML)
        #[arg(long)]
        keywords: Option<String>,
        /// Override / long-vowel tables TOML
        #[arg(long)]
        phonetic: Option<String>,
        /// Settings TOML
        #[arg(long)]
        settings: Option<String>,
    },
    /// Convert Chinese phonetic lines to IAST side tables (.txt and .md)
    ZhIast {
        /// Input file, one line per verse
        input: String,
        /// Dictionary (JSON, TOML or compiled .mtbl)
        #[arg(long, default_value = "zh_iast_mapping.json")]
        map: String,
        /// Output text file; the Markdown file is written next to it
        #[arg(long, default_value = "mapping.txt")]
        out: String,
        /// Settings TOML
        #[arg(long)]
        settings: Option<String>,
    },
    /// Build a dictionary from a parallel `chinese => target` corpus
    BuildMap {
        /// Parallel corpus file
        parallel: String,
        /// Output file (.json, or .mtbl for a compiled table)
        #[arg(long, default_value = "zh_iast_mapping.json")]
        out: String,
    },
    /// Clean raw mantra text for reading
    Clean {
        /// Input file
        #[arg(long = "in")]
        input: String,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<String>,
        /// Hint keyword list (JSON array or TOML)
        #[arg(long)]
        keywords: Option<String>,
    },
    /// Approximate IAST text in Zhuyin
    IastZhuyin {
        /// Input file with IAST text
        input: String,
        /// Output file (default: stdout)
        output: Option<String>,
        /// Phonetic tables TOML
        #[arg(long)]
        phonetic: Option<String>,
    },
    /// Convert Zhuyin syllables to numbered pinyin
    ZhuyinPinyin {
        /// Syllables to convert (ignored with --in)
        syllables: Vec<String>,
        /// Input file
        #[arg(long = "in")]
        input: Option<String>,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<String>,
    },
    /// Export `漢字<TAB>注音` lines as JSON records with pinyin and IAST
    ZhuyinRecords {
        /// Input file, one `hanzi<TAB>zhuyin` pair per line
        input: String,
        /// Output JSON file (default: stdout)
        #[arg(long)]
        out: Option<String>,
        /// Han -> IAST dictionary (default: built-in character table)
        #[arg(long)]
        map: Option<String>,
    },
    /// Export the built-in CSX rule set as TOML
    RulesExport,
    /// Validate a rule set TOML file
    RulesValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export the built-in phonetic tables as TOML
    PhoneticExport,
    /// Validate a phonetic tables TOML file
    PhoneticValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Csx {
            text,
            input,
            out,
            rules,
            multi,
            single,
            postfix,
            settings,
            no_scheme,
        } => {
            let opts = CsxOptions {
                rules_file: rules.as_deref(),
                multi_file: multi.as_deref(),
                single_file: single.as_deref(),
                postfix_file: postfix.as_deref(),
                settings_file: settings.as_deref(),
                no_scheme,
            };
            convert_ops::csx_cmd(&text, input.as_deref(), out.as_deref(), &opts);
        }
        Command::Annotate {
            input,
            out,
            style,
            keywords,
            phonetic,
            settings,
        } => {
            let opts = AnnotateOptions {
                style: style.map(OutputStyle::from),
                keywords_file: keywords.as_deref(),
                phonetic_file: phonetic.as_deref(),
                settings_file: settings.as_deref(),
            };
            annotate_ops::annotate_cmd(&input, out.as_deref(), &opts);
        }
        Command::ZhIast {
            input,
            map,
            out,
            settings,
        } => convert_ops::zh_iast_cmd(&input, &map, &out, settings.as_deref()),
        Command::BuildMap { parallel, out } => table_ops::build_map_cmd(&parallel, &out),
        Command::Clean {
            input,
            out,
            keywords,
        } => annotate_ops::clean_cmd(&input, out.as_deref(), keywords.as_deref()),
        Command::IastZhuyin {
            input,
            output,
            phonetic,
        } => convert_ops::iast_zhuyin_cmd(&input, output.as_deref(), phonetic.as_deref()),
        Command::ZhuyinPinyin {
            syllables,
            input,
            out,
        } => convert_ops::zhuyin_pinyin_cmd(&syllables, input.as_deref(), out.as_deref()),
        Command::ZhuyinRecords { input, out, map } => {
            convert_ops::zhuyin_records_cmd(&input, out.as_deref(), map.as_deref())
        }
        Command::RulesExport => config_ops::rules_export(),
        Command::RulesValidate { file } => config_ops::rules_validate(&file),
        Command::PhoneticExport => config_ops::phonetic_export(),
        Command::PhoneticValidate { file } => config_ops::phonetic_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
