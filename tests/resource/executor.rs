use cask::{Executor, Result, Value};
use futures::future::{self, Future};
use std::{
    io::{self, Write},
    sync::Mutex,
};

/// Executor keeping every statement it receives.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub statements: Vec<(String, Vec<Value>)>,
    pub fail_with: Option<String>,
}

impl Executor for RecordingExecutor {
    type Output = usize;

    fn execute(
        &mut self,
        statement: String,
        parameters: Vec<Value>,
    ) -> impl Future<Output = Result<Self::Output>> + Send {
        self.statements.push((statement, parameters));
        future::ready(match &self.fail_with {
            Some(message) => Err(cask::Error::msg(message.clone())),
            None => Ok(self.statements.len()),
        })
    }
}

static LOGS: Mutex<Vec<u8>> = Mutex::new(Vec::new());

/// Keeps a copy of the log output, forwarding it to stderr.
struct LogCapture;

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        LOGS.lock().unwrap().extend_from_slice(buf);
        io::stderr().write_all(buf)?;
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Everything logged since `init_logs`.
pub fn captured_logs() -> String {
    String::from_utf8_lossy(&LOGS.lock().unwrap()).into_owned()
}

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true)
        .target(env_logger::Target::Pipe(Box::new(LogCapture)));
    if std::env::var("RUST_LOG").is_err() {
        logger.filter_level(log::LevelFilter::Warn);
    }
    let _ = logger.try_init();
}
