use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Title,
    Bits,
}

/// Report line template with two ordered slots: the title, then the bit count.
///
/// `{}` fills the next slot, `{0}` and `{1}` name a slot explicitly, and
/// `{{` / `}}` produce literal braces. Automatic and explicit slots can not
/// be mixed in one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(template: &str) -> Result<Template> {
        let fail = |reason: &str| Error::Template {
            template: template.to_owned(),
            reason: reason.to_owned(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut auto_slots = 0usize;
        let mut explicit_slots = false;

        let mut chars = template.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(fail("single '}' encountered")),
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => return Err(fail("unclosed '{'")),
                        }
                    }

                    let slot = match name.as_str() {
                        "" => {
                            auto_slots += 1;
                            match auto_slots {
                                1 => Segment::Title,
                                2 => Segment::Bits,
                                _ => return Err(fail("more than two '{}' slots")),
                            }
                        }
                        "0" => {
                            explicit_slots = true;
                            Segment::Title
                        }
                        "1" => {
                            explicit_slots = true;
                            Segment::Bits
                        }
                        _ => return Err(fail("slot must be '{}', '{0}' or '{1}'")),
                    };

                    if auto_slots > 0 && explicit_slots {
                        return Err(fail("cannot mix automatic and numbered slots"));
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(slot);
                }
                _ => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Template { segments })
    }

    pub fn render(&self, title: &str, bits: u64) -> String {
        let mut out = String::new();
        for segment in self.segments.iter() {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Title => out.push_str(title),
                Segment::Bits => out.push_str(&bits.to_string()),
            }
        }

        out
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Template> {
        Template::parse(s)
    }
}
