//! Command line tool for preparing and publishing `protector` data.

use std::str::FromStr;

use anyhow::Context;
use clap::{
    Args,
    Parser,
    Subcommand,
};
use protector_client::{
    logs::{
        log_info,
        log_success,
        log_warning,
    },
    print_kv,
    provider::{
        DEFAULT_PROVIDER_URL,
        DEFAULT_WALLET_PATH,
        PROVIDER_URL_ENV,
        WALLET_ENV,
    },
    workspace,
    Provider,
};
use protector_interface::state::leader_schedule::MAX_SLOT_RANGES;
use solana_address::Address;

mod filter;
mod leader_schedule;
mod validators;

#[derive(Parser)]
#[clap(name = "protector", about = "Protector program tooling", version)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ProviderArgs {
    /// RPC endpoint of the cluster.
    #[clap(long, env = PROVIDER_URL_ENV, default_value = DEFAULT_PROVIDER_URL)]
    url: String,
    /// Path to the authority keypair.
    #[clap(long, env = WALLET_ENV, default_value = DEFAULT_WALLET_PATH)]
    wallet: String,
}

impl ProviderArgs {
    fn provider(&self) -> anyhow::Result<Provider> {
        Provider::from_parts(&self.url, &self.wallet)
    }
}

#[derive(Args)]
struct RateArgs {
    /// Validators JSON file.
    #[clap(long)]
    validators: String,
    /// Minimum 30 day sandwich rate for a validator to count as bad.
    #[clap(long)]
    rate: f64,
}

#[derive(Subcommand)]
enum Commands {
    #[clap(about = "List validators at or above the sandwich rate")]
    BadValidators {
        #[clap(flatten)]
        rate: RateArgs,
    },
    #[clap(about = "Count the sandwiched blocks of bad validators")]
    CountBadBlocks {
        #[clap(flatten)]
        rate: RateArgs,
    },
    #[clap(about = "Group a leader schedule into slot ranges per leader")]
    LeaderSchedule {
        /// File of `slot leader` lines.
        #[clap(long)]
        schedule: String,
        /// Validators JSON file; keeps only bad leaders when given.
        #[clap(long, requires = "rate")]
        validators: Option<String>,
        #[clap(long, requires = "validators")]
        rate: Option<f64>,
    },
    #[clap(about = "Build the bad programs bloom filter from a list of program ids")]
    BuildFilter {
        /// File with one base58 program id per line.
        #[clap(long)]
        programs: String,
        /// Writes the raw filter counters here.
        #[clap(long)]
        out: Option<String>,
    },
    #[clap(about = "Call `initialize` on the deployed program")]
    Initialize {
        #[clap(flatten)]
        provider: ProviderArgs,
    },
    #[clap(about = "Create the bad programs account")]
    InitBadPrograms {
        #[clap(flatten)]
        provider: ProviderArgs,
    },
    #[clap(about = "Flag a program")]
    AddBadProgram {
        program: String,
        #[clap(flatten)]
        provider: ProviderArgs,
    },
    #[clap(about = "Unflag a program")]
    RemoveBadProgram {
        program: String,
        #[clap(flatten)]
        provider: ProviderArgs,
    },
    #[clap(about = "Create the leader schedule account")]
    InitLeaderSchedule {
        #[clap(flatten)]
        provider: ProviderArgs,
    },
    #[clap(about = "Replace the on-chain leader schedule with the bad leaders' slot ranges")]
    PushLeaderSchedule {
        #[clap(long)]
        schedule: String,
        #[clap(flatten)]
        rate: RateArgs,
        #[clap(flatten)]
        provider: ProviderArgs,
    },
}

fn parse_address(s: &str) -> anyhow::Result<Address> {
    Address::from_str(s).map_err(|e| anyhow::anyhow!("Invalid address {s}: {e}"))
}

fn bad_validators(args: &RateArgs) -> anyhow::Result<()> {
    let validators = validators::parse_validators_file(&args.validators)?;
    let bad = validators::filter_validators(&validators, args.rate);
    for validator in bad.iter() {
        print_kv!(
            &validator.vote_account,
            validator.name.as_deref().unwrap_or("unknown")
        );
    }
    print_kv!(
        "Bad validators",
        validators::bad_vote_accounts(&validators, args.rate).len()
    );
    Ok(())
}

fn leader_schedule_groups(
    schedule: &str,
    filter: Option<(&str, f64)>,
) -> anyhow::Result<leader_schedule::ValidatorSchedule> {
    let mut groups = leader_schedule::read_leader_schedule_file(schedule)?;
    if let Some((validators_path, rate)) = filter {
        let validators = validators::parse_validators_file(validators_path)?;
        let bad = validators::bad_leader_keys(&validators, rate);
        leader_schedule::keep_only_bad_validators(&bad, &mut groups);
    }
    Ok(groups)
}

fn build_filter(programs: &str, out: Option<&str>) -> anyhow::Result<()> {
    let file = std::fs::File::open(programs).with_context(|| format!("Couldn't open {programs}"))?;
    let ids = filter::read_program_ids(std::io::BufReader::new(file))?;
    let built = filter::build_filter(&ids)?;

    print_kv!("Programs", built.num_entries);
    print_kv!("Counters", built.counters.len());
    print_kv!("Estimated false positive rate", built.false_positive_rate);
    if let Some(out) = out {
        std::fs::write(out, &built.counters).with_context(|| format!("Couldn't write {out}"))?;
        log_success("Filter written to", out);
    }
    Ok(())
}

async fn push_leader_schedule(
    schedule: &str,
    rate: &RateArgs,
    provider: &ProviderArgs,
) -> anyhow::Result<()> {
    let groups = leader_schedule_groups(schedule, Some((&rate.validators, rate.rate)))?;
    let ranges = leader_schedule::to_slot_ranges(&groups);
    if ranges.len() > MAX_SLOT_RANGES {
        anyhow::bail!(
            "{} slot ranges don't fit in the leader schedule account (max {MAX_SLOT_RANGES})",
            ranges.len()
        );
    }
    if ranges.is_empty() {
        log_warning("Leader schedule", "no bad leaders found; clearing on-chain ranges");
    }

    let program = workspace::protector(provider.provider()?);
    let chunks = leader_schedule::schedule_chunks(&ranges);
    let num_chunks = chunks.len();
    for (i, chunk) in chunks.into_iter().enumerate() {
        program
            .set_leader_schedule(i == 0, chunk)
            .rpc()
            .await
            .with_context(|| leader_schedule::chunk_failure_context(i, num_chunks))?;
    }
    print_kv!("Slot ranges pushed", ranges.len());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BadValidators { rate } => bad_validators(&rate)?,
        Commands::CountBadBlocks { rate } => {
            let validators = validators::parse_validators_file(&rate.validators)?;
            print_kv!(
                "Bad blocks",
                validators::count_bad_blocks(&validators, rate.rate)
            );
        }
        Commands::LeaderSchedule {
            schedule,
            validators,
            rate,
        } => {
            let filter = validators.as_deref().zip(rate);
            let groups = leader_schedule_groups(&schedule, filter)?;
            for (leader, ranges) in groups.iter() {
                print_kv!(leader, format!("{ranges:?}"));
            }
            print_kv!("Ranges", leader_schedule::count_ranges(&groups));
        }
        Commands::BuildFilter { programs, out } => build_filter(&programs, out.as_deref())?,
        Commands::Initialize { provider } => {
            let program = workspace::protector(provider.provider()?);
            let signature = program.initialize().rpc().await?;
            log_info("Your transaction signature", signature);
        }
        Commands::InitBadPrograms { provider } => {
            let program = workspace::protector(provider.provider()?);
            program.initialize_bad_programs().rpc().await?;
        }
        Commands::AddBadProgram {
            program: flagged,
            provider,
        } => {
            let flagged = parse_address(&flagged)?;
            let program = workspace::protector(provider.provider()?);
            program.add_bad_program(flagged).rpc().await?;
        }
        Commands::RemoveBadProgram {
            program: flagged,
            provider,
        } => {
            let flagged = parse_address(&flagged)?;
            let program = workspace::protector(provider.provider()?);
            program.remove_bad_program(flagged).rpc().await?;
        }
        Commands::InitLeaderSchedule { provider } => {
            let program = workspace::protector(provider.provider()?);
            program.initialize_leader_schedule().rpc().await?;
        }
        Commands::PushLeaderSchedule {
            schedule,
            rate,
            provider,
        } => push_leader_schedule(&schedule, &rate, &provider).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_leader_schedule_filter() {
        let cli = Cli::try_parse_from([
            "protector",
            "leader-schedule",
            "--schedule",
            "schedule.txt",
            "--validators",
            "validators.json",
            "--rate",
            "0.25",
        ])
        .unwrap();
        let Commands::LeaderSchedule {
            validators, rate, ..
        } = cli.command
        else {
            panic!("Expected the leader-schedule command");
        };
        assert_eq!(validators.as_deref(), Some("validators.json"));
        assert_eq!(rate, Some(0.25));

        // The rate is required alongside the validators file.
        assert!(Cli::try_parse_from([
            "protector",
            "leader-schedule",
            "--schedule",
            "schedule.txt",
            "--validators",
            "validators.json",
        ])
        .is_err());
    }
}
