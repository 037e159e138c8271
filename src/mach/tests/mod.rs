use crate::mach::{Config, Event, Program, Runtime};

mod fault_test;

fn runtime(words: &[i32]) -> Runtime {
    Runtime::new(Program::new(words.to_vec()))
}

fn run(runtime: &mut Runtime) -> String {
    run_cycles(runtime, 5000)
}

fn run_cycles(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    s.push_str(&format!("{}\n", error));
                }
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(&ps);
            }
        }
        match event {
            Event::Running => prev_running = true,
            _ => prev_running = false,
        }
    }
    s
}

#[test]
fn test_small_config() {
    let config = Config {
        stack_capacity: 4,
        global_capacity: 2,
    };
    let mut r = Runtime::with_config(Program::new(vec![16, 1, 20, 1, 23]), config);
    assert_eq!(run(&mut r), "");
    assert_eq!(r.globals(), &[0, 1]);
    r.load(Program::new(vec![16, 1, 20, 2, 23]));
    assert_eq!(r.config(), config);
    assert_eq!(run(&mut r), "INVALID ADDRESS AT 2; GLOBAL 2 OUT OF RANGE\n");
}
