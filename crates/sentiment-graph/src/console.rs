use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const PROMPT: &str = "Enter a topic to analyze (or type \"exit\" to quit): ";

/// Prompts for topics until `exit` (any case) or end of input, handing
/// each trimmed, non-blank line to `on_topic`. Returns how many topics
/// were handed over.
pub async fn read_topics<R, W, F>(reader: R, mut prompt: W, mut on_topic: F) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    F: FnMut(&str),
{
    let mut lines = reader.lines();
    let mut handled = 0;

    loop {
        prompt.write_all(PROMPT.as_bytes())?;
        prompt.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let topic = line.trim();
        if topic.eq_ignore_ascii_case("exit") {
            break;
        }
        if topic.is_empty() {
            continue;
        }
        on_topic(topic);
        handled += 1;
    }

    Ok(handled)
}
