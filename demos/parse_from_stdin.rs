use lenient_uri::Uri;
use std::io;

fn main() {
    for line in io::stdin().lines() {
        let line = line.expect("failed to read line");
        let uri = Uri::parse(&line);
        println!("{uri:#?}");
        println!("{uri}");
    }
}
