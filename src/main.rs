use std::io::{self, BufRead, Write};

use flatdb::{Database, Parser, Response, printer};

fn main() {
    let mut database = Database::new();

    println!("Simple Database Manager");
    println!("Enter commands (type 'exit' to quit):");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let input = line.trim_end_matches(['\n', '\r']);
        if input == "exit" {
            return;
        }

        match Parser::new(&mut database).run(input) {
            Ok(Response::Message(message)) => println!("{message}"),
            Ok(Response::Rows(result)) => print!("{}", printer::render(&result)),
            Err(error) => println!("Error: {error}"),
        }
    }
}
