use std::env;
use std::fs;
use std::path::PathBuf;

/// Default reference code when `ALARM_CODE` is not set
const DEFAULT_ALARM_CODE: &str = "1234";

/// RP2350 memory layout (Pico 2 W: 4 MiB flash, 512 KiB striped SRAM)
const MEMORY_X: &str = r#"MEMORY {
    FLASH : ORIGIN = 0x10000000, LENGTH = 4096K
    RAM : ORIGIN = 0x20000000, LENGTH = 512K
    SRAM8 : ORIGIN = 0x20080000, LENGTH = 4K
    SRAM9 : ORIGIN = 0x20081000, LENGTH = 4K
}

SECTIONS {
    .start_block : ALIGN(4)
    {
        __start_block_addr = .;
        KEEP(*(.start_block));
        KEEP(*(.boot_info));
    } > FLASH
} INSERT AFTER .vector_table;

_stext = ADDR(.start_block) + SIZEOF(.start_block);

SECTIONS {
    .bi_entries : ALIGN(4)
    {
        __bi_entries_start = .;
        KEEP(*(.bi_entries));
        . = ALIGN(4);
        __bi_entries_end = .;
    } > FLASH
} INSERT AFTER .text;

SECTIONS {
    .end_block : ALIGN(4)
    {
        __end_block_addr = .;
        KEEP(*(.end_block));
    } > FLASH
} INSERT AFTER .uninit;

PROVIDE(start_to_end = __end_block_addr - __start_block_addr);
PROVIDE(end_to_start = __start_block_addr - __end_block_addr);
"#;

fn main() {
    // Reference code baked into the firmware
    // Validated at startup; an invalid code stops the firmware with an error log
    if let Ok(code) = env::var("ALARM_CODE") {
        println!("cargo:rustc-env=ALARM_CODE={}", code);
        println!("cargo:warning=Using ALARM_CODE from environment (hidden)");
    } else {
        println!("cargo:rustc-env=ALARM_CODE={}", DEFAULT_ALARM_CODE);
    }
    println!("cargo:rerun-if-env-changed=ALARM_CODE");

    // Linker setup only for the RP2350 target
    if env::var_os("CARGO_FEATURE_PICO2_W").is_none() {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    fs::write(out_dir.join("memory.x"), MEMORY_X).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
