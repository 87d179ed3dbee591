use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use rust_binary16::{Binary16, arith};

#[derive(Parser, Debug)]
#[command(name = "binary16", version, about = "IEEE 754 half precision inspector and calculator", long_about = None)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Read every operand as a hexadecimal bit pattern (e.g. 7bff) instead of a number."
    )]
    bits: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the encoding and classification of each value.
    Inspect {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Apply one operation and print the rounded result.
    Eval {
        op: Op,

        #[arg(required = true, num_args = 1..=3, allow_hyphen_values = true)]
        operands: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Sqrt,
    Min,
    Max,
    Fma,
    Neg,
    Abs,
    Ulp,
}

impl Op {
    fn arity(self) -> usize {
        match self {
            Op::Sqrt | Op::Neg | Op::Abs | Op::Ulp => 1,
            Op::Fma => 3,
            _ => 2,
        }
    }

    fn evaluate(self, operands: &[Binary16]) -> anyhow::Result<Binary16> {
        if operands.len() != self.arity() {
            bail!(
                "{:?} takes {} operand(s), got {}",
                self,
                self.arity(),
                operands.len()
            );
        }
        let result = match self {
            Op::Add => arith::add(operands[0], operands[1]),
            Op::Sub => arith::subtract(operands[0], operands[1]),
            Op::Mul => arith::multiply(operands[0], operands[1]),
            Op::Div => arith::divide(operands[0], operands[1]),
            Op::Rem => arith::remainder(operands[0], operands[1]),
            Op::Min => arith::min(operands[0], operands[1]),
            Op::Max => arith::max(operands[0], operands[1]),
            Op::Fma => arith::fma(operands[0], operands[1], operands[2]),
            Op::Sqrt => arith::sqrt(operands[0]),
            Op::Neg => arith::negate(operands[0]),
            Op::Abs => arith::abs(operands[0]),
            Op::Ulp => arith::ulp(operands[0]),
        };
        Ok(result)
    }
}

fn read_operand(text: &str, bits: bool) -> anyhow::Result<Binary16> {
    if bits {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let raw = u16::from_str_radix(digits, 16)
            .with_context(|| format!("{:?} is not a 16-bit hexadecimal pattern", text))?;
        return Ok(Binary16::from_bits(raw));
    }
    Binary16::parse(text).with_context(|| format!("invalid operand {:?}", text))
}

fn describe(value: Binary16) -> Vec<(&'static str, String)> {
    vec![
        ("raw bits", format!("{:#06x}", value.to_raw_bits())),
        ("canonical bits", format!("{:#06x}", value.to_bits())),
        ("class", format!("{:?}", value.classify())),
        ("exponent", value.get_exponent().to_string()),
        ("ulp", value.ulp().to_string()),
        ("decimal", value.to_string()),
        ("hex", value.to_hex_string()),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    match &cli.command {
        Commands::Inspect { values } => {
            for text in values {
                let value = read_operand(text, cli.bits)?;
                println!("{}", text);
                for (label, field) in describe(value) {
                    println!("  {:<15} {}", label, field);
                }
            }
        }
        Commands::Eval { op, operands } => {
            let operands = operands
                .iter()
                .map(|text| read_operand(text, cli.bits))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let result = op.evaluate(&operands)?;
            println!("{} ({:#06x})", result, result.to_raw_bits());
        }
    }

    Ok(())
}
