#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::Duration;

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};

use pesca_light::infrastructure::drivers::{get_prng_key, init_ble_controller};
use pesca_light::infrastructure::services::PairStore;

esp_bootloader_esp_idf::esp_app_desc!();

// static_cell::make_static! in main causes a compiler error
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Allocate heap memory (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Bring up the radio and the pairing support before serving
    let controller = init_ble_controller(peripherals.BT);
    let support = mk_static!(PairStore, PairStore::new(get_prng_key()));

    #[cfg(not(feature = "fan"))]
    {
        use pesca_light::app::LightUsecases;
        use pesca_light::infrastructure::services::init_light_service;

        // Light render pipeline, then the accessory serve loop
        let light_service =
            init_light_service(spawner, peripherals.RMT, pesca_light::led_gpio!(peripherals));
        let usecases = LightUsecases::new(light_service);
        pesca_light::controllers::lightbulb::run(controller, usecases, support).await;
    }

    #[cfg(feature = "fan")]
    {
        let _ = spawner;
        pesca_light::controllers::fan::run(controller, support).await;
    }

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
