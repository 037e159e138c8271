use ansi_term::Style;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use vee::lang::Error;
use vee::mach::{Event, Runtime};

/// Installs the Ctrl-C handler. The returned flag is set on each interrupt.
pub fn interrupt_flag() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        log::warn!("Error setting Ctrl-C handler: {}", error);
    }
    interrupted
}

/// Drives the runtime until it stops. Returns false if it stopped on an error.
pub fn run(runtime: &mut Runtime, interrupted: &AtomicBool) -> std::io::Result<bool> {
    let stdout = std::io::stdout();
    let mut success = true;
    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        };
        match runtime.execute(5000) {
            Event::Stopped => break,
            Event::Errors(errors) => {
                stdout.lock().flush()?;
                report(&errors);
                success = false;
            }
            Event::Running => {}
            Event::Print(s) => {
                let mut out = stdout.lock();
                out.write_all(s.as_bytes())?;
                out.flush()?;
            }
        }
    }
    Ok(success)
}

pub fn report(errors: &[Error]) {
    for error in errors.iter() {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
    }
}
