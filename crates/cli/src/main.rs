//! KVCodec CLI: round-trips sample records through the codec strategies.
//!
//! Runs against an in-memory store:
//! - the Animal scenario through the compact strategy under `kryo-animal`
//! - the Person scenario through the portable strategy
//! - every sample record through every selected strategy
//!
//! Exits non-zero if any round trip mismatched or failed.

mod commands;

use std::process;

use tracing::{error, Level};

use kvcodec_codec::{
    CompactStrategy, PortableStrategy, RoundTripReport, RoundTripVerifier, StrategyKind,
};
use kvcodec_core::{Address, Animal, CodecResult, Person, RecordValue};
use kvcodec_storage::{InMemoryStore, KeyValueStore};

use commands::{build_cli, config_from_matches};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let verifier = match config_from_matches(&matches).and_then(RoundTripVerifier::new) {
        Ok(verifier) => verifier,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let store = InMemoryStore::new();
    let exit_code = match run(&verifier, &store) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            error!(error = %e, "Round trip failed");
            eprintln!("{}", e);
            1
        }
    };

    if !verifier.config().cleanup {
        println!("{} keys left in store: {}", store.len(), store.keys().join(", "));
    }
    process::exit(exit_code);
}

fn aimee() -> Animal {
    Animal::new("Dog", "Aimee", "Black", 5)
}

fn jonathan_parker() -> Person {
    Person::new("Jonathan", "Parker", 63)
        .with_address(Address::new("8528 Harris Avenue", "Baltimore", "MD", "21234"))
        .with_address(Address::new("324 Lantana Drive", "Owings Mills", "MD", "21117"))
        .with_phone_number("410-668-5636")
        .with_phone_number("443-604-2821")
}

fn run(verifier: &RoundTripVerifier, store: &InMemoryStore) -> CodecResult<bool> {
    let config = verifier.config();
    let mut ok = true;

    if config.strategies.contains(&StrategyKind::Compact) {
        let key = format!("{}kryo-animal", config.key_prefix);
        let matched = verifier.verify_with_key(&aimee(), &CompactStrategy::new(), store, &key)?;
        println!("{:<10} {:<8} {:<24} {}", "compact", "animal", key, verdict(matched));
        ok &= matched;
    }

    if config.strategies.contains(&StrategyKind::Portable) {
        let matched = verifier.verify(&jonathan_parker(), &PortableStrategy, store)?;
        let key = config.key_for("portable", "person");
        println!("{:<10} {:<8} {:<24} {}", "portable", "person", key, verdict(matched));
        ok &= matched;
    }

    let records = vec![
        RecordValue::from(aimee()),
        RecordValue::from(jonathan_parker()),
        RecordValue::from(Address::default().with_city("Baltimore")),
    ];
    let report = verifier.verify_all(&records, store)?;
    print_report(&report);

    Ok(ok && report.all_matched())
}

fn verdict(matched: bool) -> &'static str {
    if matched {
        "ok"
    } else {
        "MISMATCH"
    }
}

fn print_report(report: &RoundTripReport) {
    for outcome in &report.outcomes {
        println!(
            "{:<10} {:<8} {:<24} {:>5} chars  {}",
            outcome.strategy,
            outcome.kind,
            outcome.key,
            outcome.encoded_len,
            verdict(outcome.matched)
        );
    }
    println!(
        "{} round trips, {} mismatched",
        report.len(),
        report.mismatches().count()
    );
}
