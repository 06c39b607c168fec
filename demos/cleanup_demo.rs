use filter_chains::middleware::logging::{LogLevel, Logged};
use filter_chains::middleware::metrics::{FilterMetrics, Metered};
use filter_chains::middleware::timing::Timed;
use filter_chains::{Chain, ChainBehavior, ChainInput, Filter, FilterOutcome, SharedFilter};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// DOMAIN
// ============================================================================

#[derive(Debug, Default)]
struct Session {
    connection_open: bool,
    locked_resources: u32,
    temp_files: Vec<String>,
}

type Cleanup = ChainInput<Session, String>;

// ============================================================================
// FILTERS
// ============================================================================

struct CloseConnection;

impl Filter<Cleanup> for CloseConnection {
    fn apply(&self, input: &mut Cleanup) -> FilterOutcome {
        let session = input.input_mut();
        if !session.connection_open {
            return FilterOutcome::failure("connection already closed");
        }
        session.connection_open = false;
        FilterOutcome::success()
    }

    fn on_failure(&self, input: &mut Cleanup) {
        input.push("connection state unknown, flagged for audit".to_string());
    }

    fn name(&self) -> &str {
        "CloseConnection"
    }
}

struct ReleaseResources;

impl Filter<Cleanup> for ReleaseResources {
    fn apply(&self, input: &mut Cleanup) -> FilterOutcome {
        let session = input.input_mut();
        if session.locked_resources > 2 {
            return FilterOutcome::failure("some resources still locked");
        }
        session.locked_resources = 0;
        FilterOutcome::success()
    }

    fn on_failure(&self, input: &mut Cleanup) {
        let locked = input.input().locked_resources;
        input.push(format!("{} resources left locked, scheduling forced release", locked));
    }

    fn name(&self) -> &str {
        "ReleaseResources"
    }
}

struct DeleteTempFiles;

impl Filter<Cleanup> for DeleteTempFiles {
    fn apply(&self, input: &mut Cleanup) -> FilterOutcome {
        let removed = input.input_mut().temp_files.drain(..).count();
        input.push(format!("deleted {} temp file(s)", removed));
        FilterOutcome::success()
    }

    fn name(&self) -> &str {
        "DeleteTempFiles"
    }
}

// ============================================================================
// WIRING
// ============================================================================

fn cleanup_chain(metrics: &FilterMetrics) -> Chain<Cleanup> {
    let release: SharedFilter<Cleanup> =
        Arc::new(Metered::new(Logged::new(ReleaseResources), metrics));

    let mut chain = Chain::new();
    chain
        .add(release.clone())
        .add_before(
            Arc::new(Metered::new(Logged::new(CloseConnection).with_level(LogLevel::Debug), metrics)),
            &release,
        )
        .add_after(Arc::new(Metered::new(Timed::new(DeleteTempFiles), metrics)), &release);
    chain
}

fn session() -> Session {
    Session {
        connection_open: true,
        locked_resources: 5,
        temp_files: vec!["a.tmp".to_string(), "b.tmp".to_string()],
    }
}

fn report(label: &str, chain: &Chain<Cleanup>, input: &Cleanup) {
    println!("{}", label);
    println!("   session:   {:?}", input.input());
    println!("   remaining: {:?}", chain.names());
    for message in input.messages() {
        println!("   note:      {}", message);
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let metrics = FilterMetrics::new();
    let template = cleanup_chain(&metrics);
    println!("Cleanup chain: {:?}\n", template);

    // Stop at the first failure: temp files are never touched.
    let mut strict = template.clone();
    let mut input = Cleanup::new(session());
    let summary = strict.run(ChainBehavior::StopOnFailure, &mut input);
    report(&format!("STOP_ON_FAILURE -> {}", summary), &strict, &input);

    // Best effort: every step runs, failures are only recorded.
    let mut lenient = template.clone();
    let mut input = Cleanup::new(session());
    let summary = lenient.run(ChainBehavior::IgnoreFailure, &mut input);
    report(&format!("IGNORE_FAILURE -> {}", summary), &lenient, &input);

    // Policy read from configuration; an unknown name runs nothing.
    let configured = std::env::var("CLEANUP_BEHAVIOR")
        .ok()
        .and_then(|value| value.parse::<ChainBehavior>().ok());
    let mut configured_chain = template.clone();
    let mut input = Cleanup::new(session());
    let summary = configured_chain.run(configured, &mut input);
    report(&format!("CLEANUP_BEHAVIOR -> {}", summary), &configured_chain, &input);

    metrics.log_summary();
}
