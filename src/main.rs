//! Monitor and jog a stage controller.

use std::thread::sleep;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use stagelink::{
    open, Axis, BaudRate, Codec, Command, Direction, Revision, SerialPortImpl, Speed, Stage,
};

#[derive(Debug, Parser)]
struct Args {
    #[arg(index = 1, help = "serial port of the stage controller")]
    tty: String,
    #[arg(long, value_enum, default_value_t = BaudRate::B115200)]
    baud_rate: BaudRate,
    #[arg(long, value_enum, default_value_t = Revision::V1, help = "firmware revision")]
    revision: Revision,
    #[arg(long, default_value_t = 30, help = "command period in milliseconds")]
    period: u64,
    #[arg(long, value_enum, help = "axis to jog")]
    axis: Option<Axis>,
    #[arg(long, value_enum, default_value_t = Direction::Forward)]
    direction: Direction,
    #[arg(long, value_enum, default_value_t = Speed::Low)]
    speed: Speed,
    #[arg(long, help = "use the first reading as origin")]
    zero: bool,
    #[arg(long, help = "exit after this many readings")]
    count: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match open(args.tty.as_str(), args.baud_rate) {
        Ok(serial_port) => run(serial_port, &args),
        Err(error) => error!("{error}"),
    }
}

fn run(serial_port: SerialPortImpl, args: &Args) {
    let period = Duration::from_millis(args.period);
    let (stage, readings) = match Stage::open(serial_port, Codec::from(args.revision), period) {
        Ok(stage) => stage,
        Err(error) => {
            error!("{error}");
            return;
        }
    };

    if let Some(axis) = args.axis {
        stage.set_command(Command::jog(axis, args.direction, args.speed));
    }

    let mut needs_zero = args.zero;

    for reading in readings.iter().take(args.count.unwrap_or(usize::MAX)) {
        if needs_zero {
            stage.zero(reading.telemetry());
            needs_zero = false;
        }

        info!(
            "{} (raw T: {}, R: {})",
            reading.telemetry().relative_to(&stage.origin()),
            reading.telemetry().t_axis(),
            reading.telemetry().r_axis()
        );
    }

    stage.set_command(Command::STOP);
    sleep(period * 2);
}
