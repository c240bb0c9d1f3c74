//! Telemetry packing example for micropack
//!
//! Run with: cargo run --example telemetry

use micropack::*;

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pack one value into a scratch buffer and report its size
fn measure<F>(name: &str, pack: F)
where
    F: FnOnce(&mut Packer<[u8; 16]>) -> Result<usize>,
{
    let mut packer = Packer::new([0u8; 16]);
    match pack(&mut packer) {
        Ok(size) => println!("  {:<20} {} bytes", name, size),
        Err(err) => println!("  {:<20} {}", name, err),
    }
}

fn main() -> Result<()> {
    println!("micropack Telemetry Example");
    println!("===========================");
    println!("  Target profile: {:?}", TargetProfile::CURRENT);

    // Example 1: Small record on the stack
    println!("\n1. Status Record:");
    {
        let mut buf = [0u8; 64];
        let mut packer = Packer::new(&mut buf);

        packer.pack_map(2)?;
        packer.pack_str("id")?;
        packer.pack_uint(42)?;
        packer.pack_str("ok")?;
        packer.pack_bool(true)?;

        println!("  Encoded {} bytes: {}", packer.len(), hex(packer.as_slice()));
    }

    // Example 2: Fixed-width header fields in a cache-aligned buffer
    println!("\n2. Fixed-width Fields:");
    {
        let mut packer = Packer::new(StaticBuf::<32>::new());

        // Sequence and flags keep their width even when small
        packer.pack_array(3)?;
        packer.pack_uint16(1)?;
        packer.pack_uint32(0x0000_00ff)?;
        packer.pack_int64(-1)?;

        println!("  Encoded {} bytes: {}", packer.len(), hex(packer.as_slice()));
    }

    // Example 3: Sensor batch with compact integers
    println!("\n3. Sensor Batch:");
    {
        let samples: [i64; 6] = [3, -12, 140, -2_000, 70_000, -5_000_000_000];
        let mut packer = PackBuf::create(128)?;

        packer.pack_map(2)?;
        packer.pack_str("temp")?;
        packer.pack_float(21.75)?;
        packer.pack_str("samples")?;
        packer.pack_array(samples.len())?;
        for sample in samples {
            let size = packer.pack_int(sample)?;
            println!("  {:>14} -> {} bytes", sample, size);
        }

        println!("  Encoded {} bytes total", packer.len());
        packer.destroy();
    }

    // Example 4: Running out of space
    println!("\n4. Capacity Exhaustion:");
    {
        let mut buf = [0u8; 8];
        let mut packer = Packer::new(&mut buf);

        packer.pack_str("hello")?;
        match packer.pack_double(3.5) {
            Ok(size) => println!("  Unexpectedly wrote {} bytes", size),
            Err(err) => println!(
                "  Refused: {} (position still {}, {} bytes free)",
                err,
                packer.len(),
                packer.remaining()
            ),
        }

        // Reuse the same storage for the next message
        packer.reset();
        packer.pack_nil()?;
        println!("  After reset: {}", hex(packer.as_slice()));
    }

    // Example 5: Encoded size per value
    println!("\n5. Encoded Size Analysis:");
    {
        measure("nil", |p| p.pack_nil());
        measure("uint 100", |p| p.pack_uint(100));
        measure("uint 1000", |p| p.pack_uint(1000));
        measure("uint16 100", |p| p.pack_uint16(100));
        measure("int -20", |p| p.pack_int(-20));
        measure("float 1.5", |p| p.pack_float(1.5));
        measure("str \"sensor\"", |p| p.pack_str("sensor"));
        measure("array header 20", |p| p.pack_array(20));
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
