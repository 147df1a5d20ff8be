// https://github.com/WireGuard/WireGuard/blob/62b335b56cc99312ccedfa571500fbef3756a623/src/uapi/wireguard.h#L137
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WgCmd {
    GetDevice = 0,
    SetDevice = 1,
}

impl From<WgCmd> for u8 {
    fn from(cmd: WgCmd) -> Self {
        cmd as u8
    }
}
