use anyhow::{Context, Result, bail};
use skelvis_rs::settings::PlaybackSettings;
use skelvis_rs::{AnimationRequest, LoadRequest};
use std::path::PathBuf;

pub const USAGE: &str = "usage: skelvis <skeleton> [--atlas <path>] [--base <path>] [--scale <f>] \
[--skin <name>]... [--anim <name>] [--list] [--write-demo <dir>]";

#[derive(Debug, Default, PartialEq)]
pub struct Options {
    pub skeleton: Option<String>,
    pub atlas: Option<String>,
    pub base: Option<String>,
    pub scale: Option<f32>,
    pub skins: Vec<String>,
    pub animation: Option<String>,
    pub list: bool,
    pub write_demo: Option<PathBuf>,
}

impl Options {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| args.next().with_context(|| format!("{} needs a value", flag));
            match arg.as_str() {
                "--atlas" => options.atlas = Some(value("--atlas")?),
                "--base" => options.base = Some(value("--base")?),
                "--scale" => {
                    let raw = value("--scale")?;
                    options.scale = Some(raw.parse().with_context(|| format!("bad scale '{}'", raw))?);
                }
                "--skin" => options.skins.push(value("--skin")?),
                "--anim" => options.animation = Some(value("--anim")?),
                "--write-demo" => options.write_demo = Some(PathBuf::from(value("--write-demo")?)),
                "--list" => options.list = true,
                flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
                _ if options.skeleton.is_none() => options.skeleton = Some(arg),
                _ => bail!("unexpected argument {}\n{}", arg, USAGE),
            }
        }
        Ok(options)
    }

    /// Load request for the named skeleton, with playback defaults filling
    /// whatever the command line leaves out.
    pub fn load_request(&self, playback: &PlaybackSettings) -> Option<LoadRequest> {
        let skeleton = self.skeleton.as_ref()?;
        let mut request = match &self.atlas {
            Some(atlas) => LoadRequest::new(atlas.clone(), skeleton.clone()),
            None => LoadRequest::from_skeleton_file(skeleton.clone()),
        };
        if let Some(base) = &self.base {
            request = request.with_base_path(base.clone());
        }
        request = request.with_scale(self.scale.unwrap_or(playback.scale));

        let skins = if self.skins.is_empty() {
            &playback.default_skins
        } else {
            &self.skins
        };
        if !skins.is_empty() {
            request = request.with_skins(skins.iter().cloned());
        }

        if let Some(clip) = self.animation.as_ref().or(playback.default_animation.as_ref()) {
            request = request.with_animation(
                AnimationRequest::new(clip.clone())
                    .looping(playback.looping)
                    .with_mix(playback.default_mix),
            );
        }
        Some(request)
    }
}
