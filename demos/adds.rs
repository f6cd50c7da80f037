use std::num::ParseIntError;

use calltrace::calltrace;

#[calltrace("logs/log_file.txt")]
fn adds(x: i64, y: &str) -> Result<i64, ParseIntError> {
    Ok(x + y.parse::<i64>()?)
}

#[calltrace]
fn halves(a: i64) -> Result<i64, String> {
    if a % 2 != 0 {
        return Err(format!("{a} is odd"));
    }
    Ok(a / 2)
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();
    println!("{:?}", adds(4, "5"));
    println!("{:?}", adds(4, "a"));
    println!("{:?}", halves(8));
    println!("{:?}", halves(7));
}
