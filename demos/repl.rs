use log::debug;
use scicalc_rs::{AngleMode, CalcConfig, Calculator};
use std::io::{self, BufRead, Write};

fn main() {
    pretty_env_logger::init();

    let mut calc = match Calculator::new(CalcConfig::default()) {
        Ok(calc) => calc,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("[{}] > ", calc.angle_mode());
        if let Err(e) = stdout.flush() {
            eprintln!("Error: {e}");
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        debug!("input: {line}");

        match line {
            "" => continue,
            ":q" | ":quit" => break,
            ":answers" => print!("{}", calc.answers()),
            ":evict" => {
                calc.toggle_auto_evict();
                println!("auto evict: {}", calc.answers().auto_evict());
            }
            _ if line.starts_with(':') => match line[1..].parse::<AngleMode>() {
                Ok(mode) => calc.set_angle_mode(mode),
                Err(e) => println!("Error: {e}"),
            },
            _ => {
                let index = calc.answers().next_index();
                match calc.evaluate(line) {
                    Ok(value) => println!("A{index} = {value}"),
                    Err(e) if e.is_fatal() => {
                        eprintln!("Fatal: {e}");
                        break;
                    }
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
    }
}
