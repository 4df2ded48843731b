// One blocking request/response cycle with the buffer server
use crate::error::{ExchangeError, Phase};
use rtbuf_core::{Message, MessageDef, HEADER_SIZE, VERSION};
use rtbuf_transport::Transport;
use tracing::{debug, warn};

/// Send `request` and wait for the server's reply.
///
/// The header goes out first, then the payload; the reply is read the same
/// way. The response version is checked before any payload byte is read, so a
/// foreign server can never make us allocate its advertised `bufsize`.
///
/// The request is only borrowed. The response exists solely inside this
/// function until every step has succeeded; on any error the partially read
/// header and payload are dropped here and nothing escapes to the caller.
pub fn exchange<T>(transport: &mut T, request: &Message) -> Result<Message, ExchangeError>
where
    T: Transport + ?Sized,
{
    let command = request.command();

    let header = request.header().to_bytes();
    write_step(transport, &header, Phase::Header)?;
    write_step(transport, request.payload(), Phase::Payload)?;

    let mut header = [0u8; HEADER_SIZE];
    read_step(transport, &mut header, Phase::Header)?;
    let def = MessageDef::decode(&header);

    if def.version != VERSION {
        warn!(%command, expected = VERSION, actual = def.version, "incorrect version");
        return Err(ExchangeError::VersionMismatch {
            expected: VERSION,
            actual: def.version,
        });
    }

    let payload = if def.bufsize > 0 {
        let mut payload = vec![0u8; def.payload_len()];
        read_step(transport, &mut payload, Phase::Payload)?;
        payload
    } else {
        Vec::new()
    };

    debug!(
        %command,
        response = %def.command,
        sent = request.bufsize(),
        received = def.bufsize,
        "exchange complete"
    );

    // Payload buffer was sized from `bufsize`, so the lengths always agree
    let received = payload.len();
    Message::from_parts(def, payload).map_err(|_| ExchangeError::ShortRead {
        phase: Phase::Payload,
        expected: def.payload_len(),
        actual: received,
    })
}

fn write_step<T>(transport: &mut T, data: &[u8], phase: Phase) -> Result<(), ExchangeError>
where
    T: Transport + ?Sized,
{
    if data.is_empty() {
        return Ok(());
    }
    let actual = transport.write_exact(data);
    if actual != data.len() {
        warn!(%phase, expected = data.len(), actual, "write size mismatch");
        return Err(ExchangeError::ShortWrite {
            phase,
            expected: data.len(),
            actual,
        });
    }
    Ok(())
}

fn read_step<T>(transport: &mut T, buf: &mut [u8], phase: Phase) -> Result<(), ExchangeError>
where
    T: Transport + ?Sized,
{
    let actual = transport.read_exact(buf);
    if actual != buf.len() {
        warn!(%phase, expected = buf.len(), actual, "read size mismatch");
        return Err(ExchangeError::ShortRead {
            phase,
            expected: buf.len(),
            actual,
        });
    }
    Ok(())
}
