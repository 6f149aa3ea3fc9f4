use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        use linux_embedded_hal::{I2cdev, i2cdev::linux::LinuxI2CError};
        use embedded_hal::i2c::ErrorType;
        use mlx90614::*;
        use argh::FromArgs;
        use textplots::{Chart, Plot, Shape};
        use std::thread::sleep;
        use std::time::Duration;
        use indicatif::{ProgressBar, ProgressStyle};
        use serde_json;
        use std::fs::File;
        use std::io::Write;
        use std::error::Error as ErrorTrait;
        use std::iter;

        #[derive(FromArgs)]
        #[argh(description = "plot mlx90614 data")]
        struct InputArgs {
            #[argh(positional)]
            bus: String,
            #[argh(positional, from_str_fn(from_base_16))]
            addr: u8,
            #[argh(option, short='n', default = "default_num_samples()", description = "number of samples to take")]
            num: u32,
            #[argh(option, short='i', default = "default_interval()", description = "milliseconds between samples")]
            interval: u64,
            #[argh(switch, short='a', description = "sample ambient instead of object temperature")]
            ambient: bool,
            #[argh(switch, short='f', description = "plot in Fahrenheit")]
            fahrenheit: bool,
            #[argh(option, short='o', description = "out json file")]
            out_file: Option<String>
        }

        type MlxError = mlx90614::Error<<I2cdev as ErrorType>::Error>;

        #[derive(Debug)]
        #[allow(dead_code)]
        enum PlotError {
            I2c(LinuxI2CError),
            Mlx90614(MlxError),
            OutputError(Box<dyn ErrorTrait>)
        }

        impl From<LinuxI2CError> for PlotError {
            fn from(i2c_err: LinuxI2CError) -> PlotError {
                PlotError::I2c(i2c_err)
            }
        }

        impl From<MlxError> for PlotError {
            fn from(mlx_err: MlxError) -> PlotError {
                PlotError::Mlx90614(mlx_err)
            }
        }

        fn default_num_samples() -> u32 {
            100
        }

        // Default IIR/FIR settings give a fresh reading roughly every 100ms.
        fn default_interval() -> u64 {
            100
        }

        fn from_base_16(val: &str) -> Result<u8, String> {
            let no_prefix = val.trim_start_matches("0x");

            match u8::from_str_radix(no_prefix, 16) {
                Ok(v) => Ok(v),
                Err(_) => {
                    Err("Unable to convert address from base 16".into())
                }
            }
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() -> Result<(), PlotError> {
    let args: InputArgs = argh::from_env();

    let i2c: I2cdev = I2cdev::new(args.bus)?;
    let mut mlx = Mlx90614::new(i2c, args.addr)?;
    let mut points: Vec<(f32, f32)> = Vec::new();
    let mut data: Vec<f32> = Vec::new();

    let bar = ProgressBar::new(args.num as u64);
    bar.set_style(ProgressStyle::default_bar().progress_chars("#>-"));

    let (source, unit) = (
        if args.ambient { "ambient" } else { "object" },
        if args.fahrenheit { "F" } else { "C" },
    );
    println!(
        "Capturing {} temperature (1 sample every {} milliseconds)",
        source, args.interval
    );

    let ambient = args.ambient;
    let fahrenheit = args.fahrenheit;
    let interval = args.interval;

    (0..args.num)
        .zip(iter::repeat_with(|| {
            let temp = if ambient {
                mlx.ambient_temperature()
            } else {
                mlx.object_temperature()
            };

            temp.map(|t| if fahrenheit { t.fahrenheit() } else { t.celsius() })
        }))
        .map(|(i, t)| (i as f32, t))
        .try_for_each(|(i, t)| {
            let temp = t?;

            points.push((i, temp));
            data.push(temp);

            sleep(Duration::from_millis(interval.saturating_sub(1))); // ~1 milli for i2c read.
            bar.inc(1);

            Ok::<_, PlotError>(())
        })?;

    bar.finish();

    println!(
        "\ny = {} temperature samples in {} (1 every {} milliseconds)",
        args.num, unit, interval
    );
    Chart::new(120, 60, 0.0, args.num as f32)
        .lineplot(&Shape::Steps(&points))
        .display();

    let json_str = serde_json::to_string(&data).map_err(|e| PlotError::OutputError(Box::new(e)))?;

    if let Some(out) = args.out_file {
        let mut file = File::create(out).map_err(|e| PlotError::OutputError(Box::new(e)))?;
        file.write_all(json_str.as_bytes())
            .map_err(|e| PlotError::OutputError(Box::new(e)))?;
    } else {
        println!("\n{}", json_str);
    }

    let _i2c_old = mlx.free();

    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() {}
