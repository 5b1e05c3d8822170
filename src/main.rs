use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use fortune_match::{
    config::load_config,
    error::FortuneError,
    fortune::{BirthRecord, Clock, FixedClock, FortuneReport, FortuneRequest, Gender, SystemClock},
    llm::{read_fortune, ChatSession, FortuneReading, GeminiClient, LLMError},
    speech::speakable,
};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "fortune-match", about = "Bazi compatibility reading and voice chat relay")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the compatibility report
    Report {
        #[command(flatten)]
        pair: PairArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute the report and ask the model for a narrative reading
    Reading {
        #[command(flatten)]
        pair: PairArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Free-form conversation, one line per turn
    Chat {
        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Args, Debug)]
struct PairArgs {
    #[arg(long)]
    name_a: String,
    /// male or female
    #[arg(long, default_value = "male")]
    gender_a: Gender,
    /// YYYY-MM-DD
    #[arg(long)]
    birthday_a: String,
    /// Two-hour block, 0 (子) to 11 (亥)
    #[arg(long)]
    hour_a: u32,

    #[arg(long)]
    name_b: String,
    #[arg(long, default_value = "female")]
    gender_b: Gender,
    #[arg(long)]
    birthday_b: String,
    #[arg(long)]
    hour_b: u32,

    /// The two are no longer in touch
    #[arg(long)]
    lost_contact: bool,

    /// Draw the hexagram for this moment (YYYY-MM-DDTHH:MM:SS) instead of now
    #[arg(long)]
    at: Option<String>,
}

#[derive(Args, Debug)]
struct ApiArgs {
    /// Used only when GOOGLE_AI_API_KEY is not set
    #[arg(long)]
    api_key: Option<String>,
    /// Strip markup so the text can be handed to a speech synthesizer
    #[arg(long)]
    speakable: bool,
}

fn parse_birthday(value: &str) -> Result<NaiveDate, FortuneError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| FortuneError::InvalidInput(format!("birthday '{}': {}", value, e)))
}

impl PairArgs {
    fn record(
        name: &str,
        gender: Gender,
        birthday: &str,
        hour: u32,
    ) -> Result<BirthRecord, FortuneError> {
        use chrono::Datelike;

        let date = parse_birthday(birthday)?;
        BirthRecord::new(name, gender, date.year(), date.month(), date.day(), hour)
    }

    fn request(&self) -> Result<FortuneRequest, FortuneError> {
        let a = Self::record(&self.name_a, self.gender_a, &self.birthday_a, self.hour_a)?;
        let b = Self::record(&self.name_b, self.gender_b, &self.birthday_b, self.hour_b)?;
        Ok(FortuneRequest::new(a, b, !self.lost_contact))
    }

    fn clock(&self) -> Result<Box<dyn Clock>, FortuneError> {
        match &self.at {
            Some(at) => {
                let moment = NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S")
                    .map_err(|e| FortuneError::InvalidInput(format!("moment '{}': {}", at, e)))?;
                Ok(Box::new(FixedClock(moment)))
            }
            None => Ok(Box::new(SystemClock)),
        }
    }

    fn compute(&self) -> Result<FortuneReport, FortuneError> {
        let clock = self.clock()?;
        self.request()?.compute_with_clock(clock.as_ref())
    }

    async fn read(&self, client: &GeminiClient) -> Result<FortuneReading, FortuneError> {
        let clock = self.clock()?;
        read_fortune(client, &self.request()?, clock.as_ref()).await
    }
}

fn build_client(api: &ApiArgs) -> fortune_match::Result<GeminiClient> {
    let config = load_config()?;
    GeminiClient::from_config(&config, api.api_key.as_deref())
}

fn print_report(report: &FortuneReport) {
    let a = &report.person_a;
    let b = &report.person_b;
    let compat = &report.compatibility;
    let hexagram = &report.hexagram.hexagram;

    println!("{} ❤ {}", a.record.name, b.record.name);
    println!("姻緣指數：{}", report.overall_score);
    println!();
    println!(
        "生肖配對：{} · {}（{}，{}）",
        a.zodiac,
        b.zodiac,
        compat.zodiac_tier,
        compat.zodiac_tier.description()
    );
    println!(
        "五行關係：{} · {}（{}，{}）",
        compat.dominant_element_a,
        compat.dominant_element_b,
        compat.element_relation,
        compat.element_description()
    );
    println!(
        "紫微主星：{} · {}（{}/{}）",
        a.major_star, b.major_star, a.palace, b.palace
    );
    println!("易經卦象：{}卦 {}（{}）", hexagram.name, hexagram.symbol, hexagram.maxim);
    println!("甲方八字：{}（{}）", a.bazi, a.nayin);
    println!("乙方八字：{}（{}）", b.bazi, b.nayin);
}

fn output(text: &str, speak: bool) {
    if speak {
        println!("{}", speakable(text));
    } else {
        println!("{}", text);
    }
}

async fn run_chat(api: &ApiArgs) -> anyhow::Result<()> {
    let mut session = ChatSession::new(build_client(api)?);

    println!("💬 Type a message and press Enter. /reset clears the history, Ctrl+D exits.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim() == "/reset" {
            session.reset();
            println!("History cleared");
            continue;
        }

        match session.send(&line).await {
            Ok(reply) => output(&reply, api.speakable),
            Err(LLMError::EmptyMessage) => continue,
            Err(e) => {
                log::error!("Chat turn failed: {}", e);
                println!("❌ {}", e);
            }
        }
    }

    println!("\n👋 Goodbye!");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Report { pair, json } => {
            let report = pair.compute()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Reading { pair, api } => {
            let client = build_client(&api)?;
            let result = pair.read(&client).await.context("reading request failed")?;
            print_report(&result.report);
            println!();
            output(&result.reading, api.speakable);

            if let Some(advice) = result.reconnection_advice() {
                println!();
                println!("💞 復合分析");
                output(advice, api.speakable);
            }
        }
        Command::Chat { api } => run_chat(&api).await?,
    }

    Ok(())
}
