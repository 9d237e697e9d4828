//! Host UART transmit task

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::HOST_OUTBOUND;

/// Host TX task - writes queued messages as protocol lines
#[embassy_executor::task]
pub async fn host_tx_task(mut tx: BufferedUartTx) {
    info!("Host TX task started");

    loop {
        let message = HOST_OUTBOUND.receive().await;
        let line = message.to_line();

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send {:?}: {:?}", message, e);
        } else {
            trace!("TX: {:?}", message);
        }
    }
}
