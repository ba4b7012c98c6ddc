// Use the library crate (whose name is defined in Cargo.toml)
use qlisp::Env;
use qlisp::evaluator::eval;
use qlisp::parser::parse_str;
use qlisp::reader::read;

fn main() {
    println!("Welcome to qlisp!");

    let input = "(+ 1 (* 2 3) (eval (head {(- 10 4) (/ 1 0)})))";
    println!("Input:\n{}", input);

    let env = Env::new_populated();
    match parse_str(input) {
        Ok(root) => {
            println!("{}", eval(&env, read(&root)));
        }
        Err(e) => {
            e.pretty_print(input);
        }
    }
}
