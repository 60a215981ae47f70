use thermohid_device::HidrawDevice;
use thermohid_report::{
    CancellationToken, LogSink, Monitor, PairEmitter, ReportReader, StopReason,
};
use tracing::info;

use crate::cmd::MonitorArgs;
use crate::exit::{
    device_error, log_open_error, report_error, signal_error, stdout_error, CliResult, SUCCESS,
};
use crate::output::{display_sink, write_device_info, write_exiting, OutputFormat};

pub fn run(args: MonitorArgs, format: OutputFormat) -> CliResult<i32> {
    let device = HidrawDevice::open(&args.device).map_err(device_error)?;

    let log = match LogSink::create(&args.log) {
        Ok(log) => log,
        Err(err) => {
            drop(device);
            return Err(log_open_error(&args.log, err));
        }
    };

    if !args.no_describe {
        let mut stdout = std::io::stdout().lock();
        write_device_info(&mut stdout, &args.device, &device.probe(), format)
            .map_err(stdout_error)?;
    }

    let stop = CancellationToken::new();
    install_ctrlc_handler(stop.clone())?;

    let emitter = PairEmitter::new(display_sink(format), Some(log));
    let mut monitor = Monitor::new(ReportReader::new(device), emitter);
    let result = monitor.run(&stop);

    let stats = monitor.stats();
    info!(
        frames_read = stats.frames_read,
        pairs_emitted = stats.pairs_emitted,
        "monitor finished"
    );
    drop(monitor);

    match result {
        Ok(reason) => {
            if reason == StopReason::EndOfStream {
                info!(device = %args.device.display(), "device reached end of stream");
            }
            write_exiting(&mut std::io::stdout().lock(), format)
                .map_err(stdout_error)?;
            Ok(SUCCESS)
        }
        Err(err) => Err(report_error("read loop", err)),
    }
}

fn install_ctrlc_handler(stop: CancellationToken) -> CliResult<()> {
    ctrlc::set_handler(move || stop.cancel()).map_err(signal_error)
}
