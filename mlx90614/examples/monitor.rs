use cfg_if::cfg_if;
use std::io::{stdout, Write};

cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        use crossterm::{cursor, ExecutableCommand};
        use linux_embedded_hal::I2cdev;
        use mlx90614::*;
        use argh::FromArgs;
        // no_std crates don't have access to the Error trait. However, because mlx90614 crate
        // error types impl Display, we can use the eyre crate to ad-hoc convert our error types
        // to ones that impl Error via the eyre! macro.
        use eyre::{eyre, Result};
        use std::thread::sleep;
        use std::time::Duration;

        #[derive(FromArgs)]
        #[argh(description = "wait for something warm in front of an mlx90614")]
        struct InputArgs {
            #[argh(positional)]
            bus: String,
            #[argh(positional, from_str_fn(from_base_16))]
            addr: u8,
            #[argh(option, short='d', default = "5.0", description = "degrees C above ambient to wait for")]
            delta: f32,
        }

        fn from_base_16(val: &str) -> Result<u8, String> {
            match u8::from_str_radix(val.trim_start_matches("0x"), 16) {
                Ok(v) => Ok(v),
                Err(_) => {
                    Err("Unable to convert address from base 16".into())
                }
            }
        }

        fn show<I: embedded_hal::i2c::I2c>(mlx: &mut Mlx90614<I>) -> Result<f32> {
            let mut stdout = stdout();
            let temp = mlx
                .read_object_temp_c()
                .map_err(|e| eyre!("failed to read object temperature: {}", e))?;

            stdout.execute(cursor::SavePosition)?;
            stdout.write(format!("Current object temp is {:.2} C.\r", temp).as_bytes())?;
            stdout.execute(cursor::RestorePosition)?;
            stdout.flush()?;

            Ok(temp)
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() -> Result<()> {
    let args: InputArgs = argh::from_env();

    let i2c: I2cdev = I2cdev::new(args.bus)?;
    let mut mlx = Mlx90614::new(i2c, args.addr)
        .map_err(|e| eyre!("failed to find an mlx90614: {}", e))?;

    let ambient = mlx
        .read_ambient_temp_c()
        .map_err(|e| eyre!("failed to read ambient temperature: {}", e))?;
    let temp_lo = ambient + 1.0;
    let temp_hi = ambient + args.delta;

    println!(
        "Ambient is {:.2} C, target temp is {:.2} C! Hold something warm in front of the sensor!",
        ambient, temp_hi
    );

    loop {
        let temp = show(&mut mlx)?;

        sleep(Duration::from_millis(99u64)); // ~1 milli for i2c read, 100 milli for new temp.

        if temp >= temp_hi {
            break;
        }
    }

    println!("\nTake it away! Waiting for {:.2} C!", temp_lo);

    loop {
        let temp = show(&mut mlx)?;

        sleep(Duration::from_millis(99u64));

        if temp <= temp_lo {
            break;
        }
    }

    println!("\nMonitor demo done!");

    let _i2c_old = mlx.free();

    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() {}
