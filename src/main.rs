use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use log::{Level, LevelFilter, Log, Metadata, Record};
use sha1_walkthrough::{
    compress_observed, pad, schedule_observed, split, Digest, Observer, BLOCKSIZE, INITIAL_HASH,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Config {
    pause: bool,
    rounds: bool,
    words: bool,
    log_level: LevelFilter,
    message: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pause: true,
            rounds: false,
            words: false,
            log_level: LevelFilter::Warn,
            message: None,
        }
    }
}

impl Config {
    fn parse<I: IntoIterator<Item = OsString>>(args: I) -> Result<Self, String> {
        let mut config = Config::default();
        let mut words: Vec<String> = Vec::new();
        let mut args = args.into_iter().map(|arg| {
            arg.into_string()
                .map_err(|arg| format!("argument {arg:?} is not valid UTF-8"))
        });

        while let Some(arg) = args.next() {
            let arg = arg?;
            match arg.as_str() {
                "--no-pause" => config.pause = false,
                "--rounds" => config.rounds = true,
                "--words" => config.words = true,
                "--log" => {
                    let level = match args.next() {
                        Some(level) => level?,
                        None => return Err("`--log` expects a level".to_owned()),
                    };
                    config.log_level = level
                        .parse()
                        .map_err(|_| format!("unknown log level `{level}`"))?;
                }
                flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
                _ => words.push(arg),
            }
        }

        if !words.is_empty() {
            config.message = Some(words.join(" "));
        }

        Ok(config)
    }
}

/// A logger that logs to the current console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        fn colorize(text: &str, color_code: &str) -> String {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        }

        #[rustfmt::skip]
        let level_str = match record.level() {
            Level::Trace => colorize("TRACE", "90"),
            Level::Debug => colorize("DEBUG", "37"),
            Level::Info  => colorize("INFO ", "34"),
            Level::Warn  => colorize("WARN ", "33"),
            Level::Error => colorize("ERROR", "31"),
        };

        let time_str = colorize(&format_elapsed(START.get_or_init(Instant::now).elapsed()), "90");
        let module_str = colorize(record.module_path().unwrap_or_default(), "36");

        if record.level() != Level::Error {
            println!("{level_str} [{time_str}] [{module_str}]: {}", record.args());
        } else {
            eprintln!("{level_str} [{time_str}] [{module_str}]: {}", record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;
static START: OnceLock<Instant> = OnceLock::new();

// Time since the logger was installed, e.g. `+1.042s`
fn format_elapsed(elapsed: Duration) -> String {
    format!("+{}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
}

// Prints the per-block stages as the pipeline reports them
struct Narrator<'a> {
    config: &'a Config,
}

impl Observer for Narrator<'_> {
    fn word(&mut self, index: usize, word: u32) {
        if !self.config.words {
            return;
        }
        if index < 16 {
            println!("Initial word w[{index}]: {word:08x}");
        } else {
            println!("Computed word w[{index}]: {word:08x}");
        }
    }

    fn round(&mut self, index: usize, k: u32, f: u32, vars: &[u32; 5]) {
        if !self.config.rounds {
            return;
        }
        let [a, b, c, d, e] = vars;
        println!("\nRound {} (k={k:08x}, f={f:08x}):", index + 1);
        println!(" a = {a:08x}, b = {b:08x}, c = {c:08x}, d = {d:08x}, e = {e:08x}");
    }

    fn compressed(&mut self, state: &[u32; 5]) {
        let [h0, h1, h2, h3, h4] = state;
        println!("\nHash values after compression:");
        println!("h0 = {h0:08x}, h1 = {h1:08x}, h2 = {h2:08x}, h3 = {h3:08x}, h4 = {h4:08x}");
    }
}

fn to_hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

// Returns false when the user asked to quit
fn proceed(config: &Config, prompt: &str) -> io::Result<bool> {
    if !config.pause {
        return Ok(true);
    }

    print!("\n{prompt}, or 'q' to quit: ");
    io::stdout().flush()?;

    read_answer(io::stdin().lock())
}

// `q` or end of input stops the walkthrough
fn read_answer<R: BufRead>(mut input: R) -> io::Result<bool> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(!line.trim().eq_ignore_ascii_case("q"))
}

fn read_message() -> io::Result<String> {
    print!("Enter the message to hash: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn print_schedule(schedule: &[u32]) {
    println!("\nFinal message schedule:");
    for row in schedule.chunks(8) {
        let line: Vec<String> = row.iter().map(|w| format!("{w:08x}")).collect();
        println!("{}", line.join(" "));
    }
}

fn walkthrough(config: &Config, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting SHA-1 walkthrough for message: {message}");
    let data = message.as_bytes();

    // Step 1: Padding
    if !proceed(config, "Press Enter to proceed to the padding step")? {
        return Ok(());
    }
    let padded_message = pad(data)?;
    println!(
        "\nStep 1: Padding the message to 448 mod 512 bits, the remaining 64 bits hold the original length"
    );
    println!("Padded message: {}", to_hex_string(&padded_message));

    // Step 2: Block splitting
    if !proceed(config, "Press Enter to proceed to the block splitting step")? {
        return Ok(());
    }
    let message_blocks = split(&padded_message)?;
    println!("\nStep 2: Splitting the message into {BLOCKSIZE}-byte blocks");
    println!("Number of blocks: {}", message_blocks.len());

    println!("\nInitial hash values:");
    let [h0, h1, h2, h3, h4] = INITIAL_HASH;
    println!("h0 = {h0:08x}, h1 = {h1:08x}, h2 = {h2:08x}, h3 = {h3:08x}, h4 = {h4:08x}");

    // Step 3: Process each block
    let mut narrator = Narrator { config };
    let mut hash_value = INITIAL_HASH;
    for (i, block) in message_blocks.iter().enumerate() {
        println!("\nProcessing block {}:", i + 1);
        println!("Block content: {}", to_hex_string(block));

        println!("\nCalculating message schedule:");
        let message_schedule = schedule_observed(block, &mut narrator);
        print_schedule(&message_schedule);

        println!("\nStarting compression");
        hash_value = compress_observed(hash_value, &message_schedule, &mut narrator);
    }

    // Step 4: Final hash
    if !proceed(config, "Press Enter to calculate the final hash")? {
        return Ok(());
    }
    let final_hash = Digest::from_state(hash_value);
    println!("\nFinal hash: {final_hash}");

    let expected = sha1_walkthrough::digest(data);
    if final_hash != expected {
        log::error!("walkthrough produced {final_hash}, pipeline produced {expected}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let config = match Config::parse(std::env::args_os().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("usage: sha1_walkthrough [--no-pause] [--rounds] [--words] [--log <level>] [message...]");
            return ExitCode::from(2);
        }
    };

    START.get_or_init(Instant::now);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(config.log_level);
    }

    let message = match config.message.clone() {
        Some(message) => message,
        None => match read_message() {
            Ok(message) => message,
            Err(err) => {
                log::error!("failed to read message: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    match walkthrough(&config, &message) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
