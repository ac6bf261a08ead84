use std::io::Write;

use rand_rewind::*;

// Endless byte feeder for external statistical testing, e.g.
//   cargo run --release | RNG_test stdin32
// The point is not to make these generators look good (several
// reproduce known platform defects on purpose) but to have a cheap
// harness for eyeballing a backend after touching its core.

fn main() -> std::io::Result<()> {
    let mut rnd = JavaRandom::from_64(0);
    let mut stdout = std::io::stdout();

    let mut v: Vec<u8> = Vec::new();
    let mut buffer = [0u8; 1 << 10];

    loop {
        rnd.fill_bytes(&mut buffer);
        v.extend_from_slice(&buffer);

        if v.len() >= 0x10000 {
            stdout.write_all(v.as_slice())?;
            v.clear();
        }
    }
}
