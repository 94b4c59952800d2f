use std::fmt::Display;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use saju_chart::{
    Chart, ChartConfig, ChartEngine, LuckCycle, LuckCycleRule, LunarDate, MonthStemRule, RuleSet,
    Sex, parse_date,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "saju", about = "Four-pillars (사주) chart CLI")]
struct Cli {
    /// Directory holding lunar_table.csv and 24solar_terms.json
    #[arg(long, global = true, env = "SAJU_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
    /// JSON engine config (takes precedence over --data-dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Month stem rule
    #[arg(long, global = true, value_enum)]
    month_stem: Option<MonthStemArg>,
    /// Luck-cycle rule
    #[arg(long, global = true, value_enum)]
    luck_rule: Option<LuckRuleArg>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum MonthStemArg {
    Simplified,
    FiveTigers,
}

#[derive(Clone, Copy, ValueEnum)]
enum LuckRuleArg {
    Flat,
    Polarity,
}

#[derive(Subcommand)]
enum Commands {
    /// Full four-pillars chart
    Chart {
        /// Solar birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Local birth time (HH or HH:MM)
        #[arg(long)]
        time: String,
        /// 남/여 (or M/F)
        #[arg(long)]
        sex: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Lunar date for a solar date
    Lunar {
        /// Solar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Solar date for a lunar date
    Solar {
        /// Lunar date (YYYY-MM-DD)
        #[arg(long)]
        lunar: String,
        /// The lunar month is intercalary
        #[arg(long)]
        leap: bool,
    },
    /// Solar term governing a date
    Term {
        /// Solar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Day pillar for a date
    Day {
        /// Solar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Ten-year luck cycle
    Luck {
        /// Birth year (flat rule only)
        #[arg(long, required_unless_present = "date")]
        year: Option<i32>,
        /// Birth date (YYYY-MM-DD), needed by the polarity rule
        #[arg(long, conflicts_with = "year")]
        date: Option<String>,
        /// 남/여 (or M/F)
        #[arg(long)]
        sex: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Evaluate interpretation rules against a chart
    Rules {
        /// Solar birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Local birth time (HH or HH:MM)
        #[arg(long)]
        time: String,
        /// 남/여 (or M/F)
        #[arg(long)]
        sex: String,
        /// Rule file (JSON array)
        #[arg(long)]
        rules: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let engine = load_engine(&cli);

    match cli.command {
        Commands::Chart {
            date,
            time,
            sex,
            json,
        } => {
            let chart = engine
                .compute_chart_from_strs(&date, &time, &sex)
                .unwrap_or_else(|e| fail(e));
            if json {
                print_json(serde_json::to_value(&chart));
            } else {
                print_chart(&chart);
            }
        }

        Commands::Lunar { date } => {
            let date = parse_date(&date).unwrap_or_else(|e| fail(e));
            let lunar = engine.solar_to_lunar(date).unwrap_or_else(|e| fail(e));
            println!("{lunar}");
        }

        Commands::Solar { lunar, leap } => {
            let lunar = parse_lunar(&lunar, leap);
            let solar = engine.lunar_to_solar(lunar).unwrap_or_else(|e| fail(e));
            println!("{solar}");
        }

        Commands::Term { date } => {
            let date = parse_date(&date).unwrap_or_else(|e| fail(e));
            let entry = engine.term_for(date).unwrap_or_else(|e| fail(e));
            println!(
                "{} ({}) since {} - month branch {}",
                entry.term.name(),
                entry.term.english_name(),
                entry.date,
                engine
                    .month_pillar(date)
                    .map(|p| p.branch.name())
                    .unwrap_or_else(|e| fail(e))
            );
        }

        Commands::Day { date } => {
            let date = parse_date(&date).unwrap_or_else(|e| fail(e));
            let pillar = engine.day_pillar(date);
            println!("{pillar} ({}{})", pillar.stem.hanja(), pillar.branch.hanja());
        }

        Commands::Luck {
            year,
            date,
            sex,
            json,
        } => {
            let sex: Sex = sex.parse().unwrap_or_else(|e: String| fail(e));
            let cycle = match (date, year) {
                (Some(date), _) => {
                    let date = parse_date(&date).unwrap_or_else(|e| fail(e));
                    engine.luck_cycle(date, sex).unwrap_or_else(|e| fail(e))
                }
                (None, Some(year)) => {
                    if engine.config().luck_cycle_rule == LuckCycleRule::Polarity {
                        fail("the polarity rule needs --date");
                    }
                    LuckCycle::flat(year, engine.config().luck_cycle_len)
                }
                (None, None) => fail("either --year or --date is required"),
            };
            if json {
                print_json(serde_json::to_value(cycle.iter().collect::<Vec<_>>()));
            } else {
                print_luck(&cycle);
            }
        }

        Commands::Rules {
            date,
            time,
            sex,
            rules,
            json,
        } => {
            let rules = RuleSet::load(&rules).unwrap_or_else(|e| fail(e));
            let chart = engine
                .compute_chart_from_strs(&date, &time, &sex)
                .unwrap_or_else(|e| fail(e));
            let matched: Vec<_> = rules.matching(&chart).collect();
            if json {
                print_json(serde_json::to_value(&matched));
            } else if matched.is_empty() {
                println!("No rules matched ({} evaluated)", rules.len());
            } else {
                for rule in matched {
                    println!("[{}] {}", rule.name, rule.interpretation);
                }
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(msg: impl Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn load_engine(cli: &Cli) -> ChartEngine {
    let mut config = match &cli.config {
        Some(path) => ChartConfig::load(path).unwrap_or_else(|e| fail(e)),
        None => ChartConfig::from_data_dir(&cli.data_dir),
    };
    if let Some(rule) = cli.month_stem {
        config.month_stem_rule = match rule {
            MonthStemArg::Simplified => MonthStemRule::Simplified,
            MonthStemArg::FiveTigers => MonthStemRule::FiveTigers,
        };
    }
    if let Some(rule) = cli.luck_rule {
        config.luck_cycle_rule = match rule {
            LuckRuleArg::Flat => LuckCycleRule::Flat,
            LuckRuleArg::Polarity => LuckCycleRule::Polarity,
        };
    }
    debug!(?config, "loading engine");
    ChartEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to load engine: {e}");
        std::process::exit(1);
    })
}

fn parse_lunar(s: &str, leap: bool) -> LunarDate {
    let parts: Vec<&str> = s.trim().split('-').collect();
    let [y, m, d] = parts.as_slice() else {
        fail(format!("invalid lunar date: {s}"));
    };
    match (y.parse(), m.parse(), d.parse()) {
        (Ok(y), Ok(m), Ok(d)) => LunarDate::new(y, m, d, leap),
        _ => fail(format!("invalid lunar date: {s}")),
    }
}

fn print_json(value: Result<serde_json::Value, serde_json::Error>) {
    match value.and_then(|v| serde_json::to_string_pretty(&v)) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(e),
    }
}

fn print_chart(chart: &Chart) {
    println!(
        "Birth:      {} {} ({})",
        chart.birth_date,
        chart.birth_time,
        chart.sex.name()
    );
    println!("Lunar:      {}", chart.lunar_date);
    println!(
        "Solar term: {} ({})",
        chart.solar_term.term.name(),
        chart.solar_term.date
    );
    println!();
    println!("        Hour  Day   Month Year");
    let p = &chart.pillars;
    println!(
        "Stem    {}    {}    {}    {}",
        p.hour.stem, p.day.stem, p.month.stem, p.year.stem
    );
    println!(
        "Branch  {}    {}    {}    {}",
        p.hour.branch, p.day.branch, p.month.branch, p.year.branch
    );
    println!();
    let counts: Vec<String> = chart
        .elements
        .iter()
        .map(|(e, n)| format!("{e} {n}"))
        .collect();
    println!(
        "Elements:   {}  (dominant {})",
        counts.join("  "),
        chart.dominant_element()
    );
    println!();
    println!("Luck cycle:");
    for entry in &chart.luck_cycle {
        println!("  age {:>3}  {}", entry.start_age, entry.pillar);
    }
}

fn print_luck(cycle: &LuckCycle) {
    println!("{:?} from {}", cycle.direction(), cycle.start().pillar());
    for entry in cycle {
        println!("  age {:>3}  {}", entry.start_age, entry.pillar);
    }
}
