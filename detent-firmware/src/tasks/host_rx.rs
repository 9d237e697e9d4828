//! Host UART receive task
//!
//! Splits the serial stream into lines and queues them for the control loop.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use detent_protocol::LineParser;

use crate::channels::HOST_LINES;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Host RX task - receives and frames lines from the host
#[embassy_executor::task]
pub async fn host_rx_task(mut rx: BufferedUartRx) {
    info!("Host RX task started");

    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(line)) => {
                            debug!("Host line: {}", line.as_str());
                            if HOST_LINES.try_send(line).is_err() {
                                warn!("Host line channel full, dropping line");
                            }
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Host line error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                // Bytes were lost; the partial line cannot be trusted
                warn!("UART read error: {:?}", e);
                parser.reset();
            }
        }
    }
}
