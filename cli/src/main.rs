use clap::Parser;
use jinsn::{
    DecodeOptions, DisassemblyOptions, analysis::InstructionStats, decode, parse_hex, render_error,
};
use miette::{IntoDiagnostic, Result};
use std::io::BufRead;
use std::io::BufReader;

/// jinsn - Disassemble JVM bytecode
#[derive(Parser, Debug)]
#[command(name = "jinsn")]
#[command(about = "Disassemble iconst/bipush/ldc/fstore bytecode given as hex", long_about = None)]
struct Args {
    /// Show opcode and length next to each mnemonic
    #[arg(short, long)]
    verbose: bool,

    /// Reject the `wide` prefix
    #[arg(long)]
    no_wide: bool,

    /// Reject code arrays longer than this many bytes
    #[arg(long, default_value_t = jinsn_core::options::MAX_CODE_LENGTH)]
    max_code_length: usize,

    /// Print opcode and capability counts after the listing
    #[arg(long)]
    stats: bool,

    /// Code array as hex (if not provided, reads one code array per line from stdin)
    hex: Option<String>,
}

impl Args {
    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            max_code_length: self.max_code_length,
            allow_wide: !self.no_wide,
        }
    }

    fn disassembly_options(&self) -> DisassemblyOptions {
        DisassemblyOptions {
            verbose: self.verbose,
            ..DisassemblyOptions::default()
        }
    }
}

/// Disassemble one code array. Errors are rendered, not returned, so pipe
/// mode keeps going after a bad line.
fn disassemble_input(input: &str, args: &Args) {
    let bytes = match parse_hex(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            render_error(&jinsn::Error::hex(e, input));
            return;
        }
    };

    let code = match decode(&bytes, &args.decode_options()) {
        Ok(code) => code,
        Err(e) => {
            render_error(&e);
            return;
        }
    };

    // No constant pool on the command line; ldc shows bare indexes
    print!(
        "{}",
        jinsn::disassemble(&code, None, &args.disassembly_options())
    );

    if args.stats {
        let mut stats = InstructionStats::new();
        code.accept(&mut stats);
        print_stats(&stats);
    }
}

fn print_stats(stats: &InstructionStats) {
    println!();
    println!("=== Stats ===");
    println!("instructions: {} ({} bytes)", stats.instructions, stats.bytes);
    for (opcode, count) in stats.opcodes() {
        println!("  {:<10} {}", opcode.mnemonic(), count);
    }
    println!("constant pushes: {}", stats.constant_pushes);
    println!("pool references: {}", stats.pool_references);
    println!("stores: {}", stats.stores);
    println!(
        "stack: +{} -{} (max depth {})",
        stats.words_pushed,
        stats.words_popped,
        stats.max_stack_delta()
    );
    if let Some(slot) = stats.max_local {
        println!("max local: {}", slot);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(?args, "parsed arguments");

    if let Some(hex) = &args.hex {
        disassemble_input(hex, &args);
        return Ok(());
    }

    // Pipe/stdin mode
    let stdin = std::io::stdin();
    let reader = BufReader::new(stdin.lock());

    for line in reader.lines() {
        let line = line.into_diagnostic()?;
        if line.trim().is_empty() {
            continue;
        }
        disassemble_input(&line, &args);
    }

    Ok(())
}
