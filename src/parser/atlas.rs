use crate::error::AssetError;
use crate::model::{AtlasPage, AtlasRegion, TextureAtlas};

/// Parses a Spine-style text atlas.
///
/// A page starts with its image name (first line, or the first line after a
/// blank one); every other bare line starts a region of the current page.
/// `key: a,b,...` lines set properties on the current region, or on the page
/// when no region has started yet. Unknown keys are ignored.
pub fn parse_atlas(text: &str) -> Result<TextureAtlas, AssetError> {
    let mut atlas = TextureAtlas::default();
    let mut page: Option<usize> = None;
    let mut region: Option<usize> = None;
    let mut expect_page = true;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            expect_page = true;
            region = None;
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            let values: Vec<&str> = value.split(',').map(str::trim).collect();
            if let Some(r) = region {
                region_property(&mut atlas.regions[r], key, &values, line_no)?;
            } else if let Some(p) = page {
                page_property(&mut atlas.pages[p], key, &values, line_no)?;
            } else {
                return Err(AssetError::atlas(line_no, "property before the first page"));
            }
            continue;
        }

        if expect_page {
            atlas.pages.push(AtlasPage::new(line, 0, 0));
            page = Some(atlas.pages.len() - 1);
            region = None;
            expect_page = false;
        } else {
            let Some(p) = page else {
                return Err(AssetError::atlas(line_no, "region before the first page"));
            };
            atlas.regions.push(AtlasRegion {
                name: line.to_string(),
                page: p,
                x: 0,
                y: 0,
                width: 0,
                height: 0,
                rotate: false,
            });
            region = Some(atlas.regions.len() - 1);
        }
    }

    Ok(atlas)
}

fn page_property(page: &mut AtlasPage, key: &str, values: &[&str], line: usize) -> Result<(), AssetError> {
    match key {
        "size" => {
            let [w, h] = numbers::<2>(values, line)?;
            page.width = w;
            page.height = h;
        }
        "pma" => page.pma = values.first().is_some_and(|v| *v == "true"),
        _ => {} // filter, format, repeat
    }
    Ok(())
}

fn region_property(
    region: &mut AtlasRegion,
    key: &str,
    values: &[&str],
    line: usize,
) -> Result<(), AssetError> {
    match key {
        "bounds" => {
            let [x, y, w, h] = numbers::<4>(values, line)?;
            region.x = x;
            region.y = y;
            region.width = w;
            region.height = h;
        }
        "xy" => {
            let [x, y] = numbers::<2>(values, line)?;
            region.x = x;
            region.y = y;
        }
        "size" => {
            let [w, h] = numbers::<2>(values, line)?;
            region.width = w;
            region.height = h;
        }
        "rotate" => {
            region.rotate = match values.first().copied() {
                Some("true" | "90") => true,
                Some("false" | "0") | None => false,
                Some(other) => {
                    return Err(AssetError::atlas(line, format!("unsupported rotation '{}'", other)));
                }
            };
        }
        _ => {} // offsets, orig, index
    }
    if region.extent().is_none() {
        return Err(AssetError::atlas(line, format!("region '{}' overflows its page", region.name)));
    }
    Ok(())
}

fn numbers<const N: usize>(values: &[&str], line: usize) -> Result<[u32; N], AssetError> {
    if values.len() < N {
        return Err(AssetError::atlas(line, format!("expected {} values, found {}", N, values.len())));
    }
    let mut out = [0u32; N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = value
            .parse()
            .map_err(|_| AssetError::atlas(line, format!("'{}' is not a number", value)))?;
    }
    Ok(out)
}
